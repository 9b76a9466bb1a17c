use crate::error::{GatewayError, Result};
use auth_identity::{extract_detail, IdentityConfig};
use credential_store::CredentialStore;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use url::Url;

const EVENT_CAPACITY: usize = 16;

/// Session-level notifications raised by the authenticator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The stored credential was rejected and has been cleared
    Invalidated,
}

/// Sends requests on behalf of the current session
///
/// The stored access token is attached as a bearer credential. A 401 answer
/// to a request that carried a token clears that token's credential set and
/// broadcasts [`SessionEvent::Invalidated`]. Requests are never retried.
pub struct RequestAuthenticator {
    http: reqwest::Client,
    base_url: Url,
    store: Arc<dyn CredentialStore>,
    events: broadcast::Sender<SessionEvent>,
}

impl RequestAuthenticator {
    pub fn new(config: &IdentityConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        Self::with_timeout(config, config.timeout(), store)
    }

    pub fn with_timeout(config: &IdentityConfig, timeout: Duration, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let base_url = config.base_url()?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GatewayError::Configuration(format!("failed to build HTTP client: {e}")))?;
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Ok(Self {
            http,
            base_url,
            store,
            events,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Send a request, returning any response other than 401 as-is
    #[tracing::instrument(skip(self, method, body), fields(method = %method))]
    pub async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| GatewayError::Configuration(format!("invalid endpoint `{path}`: {e}")))?;

        let token = self.store.access_token().await?;

        let mut request = self.http.request(method, url);
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        match token {
            Some(token) => {
                self.invalidate(&token).await?;
                Err(GatewayError::SessionInvalidated)
            }
            None => Err(GatewayError::Unauthorized),
        }
    }

    /// Send a request and decode a successful JSON answer
    pub async fn send_json<B, R>(&self, method: Method, path: &str, body: Option<&B>) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let text = self.send_expecting_success(method, path, body).await?;
        serde_json::from_str(&text).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    /// Send a request whose answer body is irrelevant beyond its status
    pub async fn send_expecting_success<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        let response = self.send(method, path, body).await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            Ok(text)
        } else if status == StatusCode::FORBIDDEN {
            Err(GatewayError::Forbidden)
        } else {
            Err(GatewayError::Server {
                status: status.as_u16(),
                detail: extract_detail(&text),
            })
        }
    }

    async fn invalidate(&self, rejected_token: &str) -> Result<()> {
        if self.store.clear_if_token(rejected_token).await? {
            tracing::warn!("stored credential rejected by authority; session cleared");
            if self.events.send(SessionEvent::Invalidated).is_err() {
                tracing::debug!("no session listeners for invalidation");
            }
        } else {
            tracing::info!("rejected credential was already replaced; session kept");
        }
        Ok(())
    }
}
