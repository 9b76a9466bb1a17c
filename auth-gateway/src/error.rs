use credential_store::StoreError;
use error_common::PlantGuardError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// The attached credential was rejected; the session is gone
    #[error("Session invalidated by the authority")]
    SessionInvalidated,

    /// 401 on a request that carried no credential
    #[error("Request requires authentication")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Network unavailable: {0}")]
    Network(String),

    #[error("Server returned {status}")]
    Server { status: u16, detail: Option<String> },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Role cannot be assigned: {0}")]
    InvalidRole(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Network("request timed out".to_string())
        } else if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}

impl From<auth_identity::IdentityError> for GatewayError {
    fn from(err: auth_identity::IdentityError) -> Self {
        GatewayError::Configuration(err.to_string())
    }
}

impl From<GatewayError> for PlantGuardError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Storage(store) => store.into(),
            GatewayError::SessionInvalidated => PlantGuardError::SessionInvalidated,
            GatewayError::Unauthorized | GatewayError::Forbidden => PlantGuardError::Forbidden,
            GatewayError::Network(detail) => PlantGuardError::NetworkUnavailable(detail),
            GatewayError::Server { detail, .. } => PlantGuardError::ServerError(detail),
            GatewayError::Decode(_) => PlantGuardError::ServerError(None),
            GatewayError::InvalidRole(role) => PlantGuardError::Validation(format!("role `{role}` cannot be assigned")),
            GatewayError::Configuration(detail) => PlantGuardError::Configuration(detail),
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
