//! HTTP-level behaviour of the identity client against a mock authority

use auth_identity::{IdentityAuthority, IdentityClient, IdentityConfig, IdentityError, RegistrationProfile};
use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;

fn client_for(server: &Server) -> IdentityClient {
    let config = IdentityConfig {
        base_url: format!("{}/api", server.url()),
        ..Default::default()
    };
    IdentityClient::new(config).unwrap()
}

fn profile() -> RegistrationProfile {
    RegistrationProfile {
        username: "ana".into(),
        first_name: "Ana".into(),
        last_name: "Lopez".into(),
        email: "Ana@X.com".into(),
        password: "secret1".into(),
        confirm_password: "secret1".into(),
    }
}

#[tokio::test]
async fn login_sends_normalized_email_and_decodes_grant() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/login/")
        .match_body(Matcher::Json(json!({"email": "admin@x.com", "password": "p"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access":"A1","refresh":"R1","role":"admin","user_id":7}"#)
        .create_async()
        .await;

    let grant = client_for(&server).login("  Admin@X.com ", "p").await.unwrap();

    mock.assert_async().await;
    assert_eq!(grant.access_token, "A1");
    assert_eq!(grant.refresh_token, "R1");
    assert_eq!(grant.role, "admin");
    assert_eq!(grant.user_id, "7");
}

#[tokio::test]
async fn login_keeps_unknown_roles_verbatim() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/login/")
        .with_status(200)
        .with_body(r#"{"access":"A","refresh":"R","role":"superuser","user_id":"u-9"}"#)
        .create_async()
        .await;

    let grant = client_for(&server).login("a@x.com", "p").await.unwrap();
    assert_eq!(grant.role, "superuser");
    assert_eq!(grant.user_id, "u-9");
}

#[tokio::test]
async fn rejected_login_is_invalid_credentials() {
    for status in [400, 401] {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/login/")
            .with_status(status)
            .with_body(r#"{"detail":"No active account found"}"#)
            .create_async()
            .await;

        let err = client_for(&server).login("a@x.com", "wrong").await.unwrap_err();
        assert_eq!(err, IdentityError::InvalidCredentials);
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn login_with_empty_fields_never_reaches_the_network() {
    let mut server = Server::new_async().await;
    let mock = server.mock("POST", "/api/login/").expect(0).create_async().await;

    let client = client_for(&server);
    assert!(matches!(client.login("", "p").await, Err(IdentityError::Validation(_))));
    assert!(matches!(client.login("a@x.com", "").await, Err(IdentityError::Validation(_))));

    mock.assert_async().await;
}

#[tokio::test]
async fn malformed_login_body_is_a_server_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/login/")
        .with_status(200)
        .with_body(r#"{"access":"A"}"#)
        .create_async()
        .await;

    let err = client_for(&server).login("a@x.com", "p").await.unwrap_err();
    assert_eq!(err, IdentityError::ServerError(None));
}

#[tokio::test]
async fn empty_tokens_in_login_body_are_a_server_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/login/")
        .with_status(200)
        .with_body(r#"{"access":"","refresh":"R","role":"admin","user_id":1}"#)
        .create_async()
        .await;

    let err = client_for(&server).login("a@x.com", "p").await.unwrap_err();
    assert_eq!(err, IdentityError::ServerError(None));
}

#[tokio::test]
async fn authority_outage_surfaces_detail() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/login/")
        .with_status(503)
        .with_body(r#"{"error":"maintenance window"}"#)
        .create_async()
        .await;

    let err = client_for(&server).login("a@x.com", "p").await.unwrap_err();
    assert_eq!(err, IdentityError::ServerError(Some("maintenance window".into())));
}

#[tokio::test]
async fn register_posts_profile_without_confirmation() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/signup/")
        .match_body(Matcher::Json(json!({
            "username": "ana",
            "first_name": "Ana",
            "last_name": "Lopez",
            "email": "ana@x.com",
            "password": "secret1"
        })))
        .with_status(201)
        .with_body(r#"{"id":12}"#)
        .create_async()
        .await;

    client_for(&server).register(&profile()).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn register_mismatch_is_caught_locally() {
    let mut server = Server::new_async().await;
    let mock = server.mock("POST", "/api/signup/").expect(0).create_async().await;

    let mut mismatched = profile();
    mismatched.confirm_password = "secret2".into();
    let err = client_for(&server).register(&mismatched).await.unwrap_err();

    assert_eq!(err, IdentityError::Validation("passwords do not match".into()));
    mock.assert_async().await;
}

#[tokio::test]
async fn register_rejection_carries_field_errors() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/signup/")
        .with_status(400)
        .with_body(r#"{"email":["user with this email already exists."]}"#)
        .create_async()
        .await;

    let err = client_for(&server).register(&profile()).await.unwrap_err();
    assert_eq!(
        err,
        IdentityError::Validation("email: user with this email already exists.".into())
    );
}

#[tokio::test]
async fn verify_email_reports_existence() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/verify-email/")
        .match_body(Matcher::Json(json!({"email": "ana@x.com"})))
        .with_status(200)
        .with_body(r#"{"exists":true}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/api/verify-email/")
        .match_body(Matcher::Json(json!({"email": "ghost@x.com"})))
        .with_status(404)
        .with_body(r#"{"exists":false}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    assert!(client.verify_email_exists("ana@x.com").await.unwrap());
    assert!(!client.verify_email_exists("ghost@x.com").await.unwrap());
}

#[tokio::test]
async fn reset_password_checks_locally_before_sending() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/change-password/")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.reset_password("ana@x.com", "abc", "abc").await,
        Err(IdentityError::Validation(_))
    ));
    assert!(matches!(
        client.reset_password("ana@x.com", "secret1", "secret2").await,
        Err(IdentityError::Validation(_))
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn reset_password_honours_success_flag() {
    let mut server = Server::new_async().await;
    let ok = server
        .mock("POST", "/api/change-password/")
        .match_body(Matcher::Json(json!({
            "email": "ana@x.com",
            "new_password": "secret1",
            "confirm_password": "secret1"
        })))
        .with_status(200)
        .with_body(r#"{"success":true}"#)
        .create_async()
        .await;

    client_for(&server)
        .reset_password("ana@x.com", "secret1", "secret1")
        .await
        .unwrap();
    ok.assert_async().await;
}

#[tokio::test]
async fn reset_password_refusal_is_a_validation_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/change-password/")
        .with_status(200)
        .with_body(r#"{"success":false,"error":"User not found"}"#)
        .create_async()
        .await;
    let err = client_for(&server)
        .reset_password("ana@x.com", "secret1", "secret1")
        .await
        .unwrap_err();
    assert_eq!(err, IdentityError::Validation("User not found".into()));
}

#[tokio::test]
async fn silent_authority_times_out_as_network_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hold = tokio::spawn(async move {
        let mut open = Vec::new();
        loop {
            if let Ok((socket, _)) = listener.accept().await {
                open.push(socket);
            }
        }
    });

    let config = IdentityConfig {
        base_url: format!("http://{addr}/api/"),
        ..Default::default()
    };
    let client = IdentityClient::with_timeout(config, Duration::from_millis(200)).unwrap();
    let err = client.login("a@x.com", "p").await.unwrap_err();

    assert_eq!(err, IdentityError::NetworkUnavailable("request timed out".into()));
    hold.abort();
}

#[tokio::test]
async fn unreachable_authority_is_network_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = IdentityConfig {
        base_url: format!("http://{addr}/api/"),
        ..Default::default()
    };
    let err = IdentityClient::new(config)
        .unwrap()
        .login("a@x.com", "p")
        .await
        .unwrap_err();
    assert!(matches!(err, IdentityError::NetworkUnavailable(_)));
}
