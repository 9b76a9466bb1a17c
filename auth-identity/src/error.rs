use error_common::PlantGuardError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),

    #[error("Server error: {}", .0.as_deref().unwrap_or("unexpected response"))]
    ServerError(Option<String>),

    #[error("Email has not been verified in this recovery flow")]
    EmailNotVerified,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for IdentityError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            IdentityError::NetworkUnavailable("request timed out".to_string())
        } else if err.is_decode() {
            IdentityError::ServerError(None)
        } else {
            IdentityError::NetworkUnavailable(err.to_string())
        }
    }
}

impl From<IdentityError> for PlantGuardError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Validation(detail) => PlantGuardError::Validation(detail),
            IdentityError::InvalidCredentials => PlantGuardError::InvalidCredentials,
            IdentityError::NetworkUnavailable(detail) => PlantGuardError::NetworkUnavailable(detail),
            IdentityError::ServerError(detail) => PlantGuardError::ServerError(detail),
            IdentityError::EmailNotVerified => {
                PlantGuardError::Validation("Verify your email address first.".to_string())
            }
            IdentityError::Configuration(detail) => PlantGuardError::Configuration(detail),
        }
    }
}

pub type Result<T> = std::result::Result<T, IdentityError>;
