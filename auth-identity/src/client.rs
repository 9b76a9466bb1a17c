use crate::authority::IdentityAuthority;
use crate::config::IdentityConfig;
use crate::error::{IdentityError, Result};
use crate::models::*;
use crate::validation::{
    normalize_identifier, validate_email, validate_login, validate_new_password, validate_registration,
};
use async_trait::async_trait;
use logger_redacted::redact;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// HTTP client for the identity authority
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: Url,
    config: IdentityConfig,
}

impl IdentityClient {
    pub fn new(config: IdentityConfig) -> Result<Self> {
        let timeout = config.timeout();
        Self::with_timeout(config, timeout)
    }

    pub fn with_timeout(config: IdentityConfig, timeout: Duration) -> Result<Self> {
        let base_url = config.base_url()?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| IdentityError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url, config })
    }

    pub fn config(&self) -> &IdentityConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| IdentityError::Configuration(format!("invalid endpoint `{path}`: {e}")))
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(StatusCode, String)> {
        let url = self.endpoint(path)?;
        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(path, status = status.as_u16(), "authority responded");
        Ok((status, text))
    }
}

fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!(path, error = %e, "unexpected response shape from authority");
        IdentityError::ServerError(None)
    })
}

#[async_trait]
impl IdentityAuthority for IdentityClient {
    #[tracing::instrument(skip(self, identifier, secret), fields(identifier = %redact(identifier)))]
    async fn login(&self, identifier: &str, secret: &str) -> Result<LoginGrant> {
        validate_login(identifier, secret)?;
        let email = normalize_identifier(identifier);

        let (status, body) = self
            .post_json("login/", &LoginRequest { email: &email, password: secret })
            .await?;

        match status {
            s if s.is_success() => {
                let grant = LoginGrant::from(decode::<LoginResponse>("login/", &body)?);
                if grant.access_token.is_empty() || grant.refresh_token.is_empty() || grant.user_id.is_empty() {
                    tracing::warn!("authority returned an incomplete login grant");
                    return Err(IdentityError::ServerError(None));
                }
                tracing::info!(role = %grant.role, "login accepted");
                Ok(grant)
            }
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                tracing::info!("login rejected");
                Err(IdentityError::InvalidCredentials)
            }
            _ => Err(IdentityError::ServerError(extract_detail(&body))),
        }
    }

    #[tracing::instrument(skip(self, profile), fields(username = %profile.username))]
    async fn register(&self, profile: &RegistrationProfile) -> Result<()> {
        validate_registration(profile)?;
        let email = normalize_identifier(&profile.email);

        let request = SignupRequest {
            username: profile.username.trim(),
            first_name: profile.first_name.trim(),
            last_name: profile.last_name.trim(),
            email: &email,
            password: &profile.password,
        };
        let (status, body) = self.post_json("signup/", &request).await?;

        match status {
            s if s.is_success() => {
                tracing::info!("account created");
                Ok(())
            }
            StatusCode::BAD_REQUEST => Err(IdentityError::Validation(
                extract_detail(&body).unwrap_or_else(|| "registration was rejected".to_string()),
            )),
            _ => Err(IdentityError::ServerError(extract_detail(&body))),
        }
    }

    #[tracing::instrument(skip(self, email), fields(email = %redact(email)))]
    async fn verify_email_exists(&self, email: &str) -> Result<bool> {
        validate_email(email)?;
        let email = normalize_identifier(email);

        let (status, body) = self
            .post_json("verify-email/", &VerifyEmailRequest { email: &email })
            .await?;

        match status {
            s if s.is_success() => Ok(decode::<VerifyEmailResponse>("verify-email/", &body)?.exists),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(IdentityError::ServerError(extract_detail(&body))),
        }
    }

    #[tracing::instrument(skip(self, email, new_secret, confirm_secret), fields(email = %redact(email)))]
    async fn reset_password(&self, email: &str, new_secret: &str, confirm_secret: &str) -> Result<()> {
        validate_email(email)?;
        validate_new_password(new_secret, confirm_secret, self.config.password_min_length)?;
        let email = normalize_identifier(email);

        let request = ChangePasswordRequest {
            email: &email,
            new_password: new_secret,
            confirm_password: confirm_secret,
        };
        let (status, body) = self.post_json("change-password/", &request).await?;

        match status {
            s if s.is_success() => {
                let response = decode::<ChangePasswordResponse>("change-password/", &body)?;
                if response.success {
                    tracing::info!("password changed");
                    Ok(())
                } else {
                    Err(IdentityError::Validation(
                        response
                            .error
                            .or(response.message)
                            .unwrap_or_else(|| "password could not be changed".to_string()),
                    ))
                }
            }
            StatusCode::BAD_REQUEST => Err(IdentityError::Validation(
                extract_detail(&body).unwrap_or_else(|| "password could not be changed".to_string()),
            )),
            _ => Err(IdentityError::ServerError(extract_detail(&body))),
        }
    }
}
