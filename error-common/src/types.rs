use crate::codes;
use thiserror::Error;

const GENERIC_SERVER_MESSAGE: &str = "The server could not complete the request. Please try again later.";

/// User-facing error taxonomy shared by every crate in the workspace
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlantGuardError {
    /// Input rejected before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// The identity authority rejected the identifier/secret pair
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Timeout or connectivity failure
    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),

    /// Authority-side failure, with its message when one was returned
    #[error("Server error: {}", .0.as_deref().unwrap_or("no detail"))]
    ServerError(Option<String>),

    /// The stored credential was rejected and the session was torn down
    #[error("Session invalidated")]
    SessionInvalidated,

    /// The credential store could not be read or written
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Another login or registration attempt is still in flight
    #[error("Another attempt is already in progress")]
    AttemptInProgress,

    /// The authority granted a role this client cannot route
    #[error("Unrecognized role: {0}")]
    UnrecognizedRole(String),

    /// The current session may not enter the requested screen
    #[error("Access denied")]
    Forbidden,

    /// Client configuration could not be loaded
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PlantGuardError {
    /// Stable code for logs and support requests
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => codes::validation::MISSING_REQUIRED_FIELD,
            Self::InvalidCredentials => codes::authentication::INVALID_CREDENTIALS,
            Self::NetworkUnavailable(_) => codes::network::UNAVAILABLE,
            Self::ServerError(_) => codes::network::SERVER_ERROR,
            Self::SessionInvalidated => codes::authentication::SESSION_INVALID,
            Self::StorageUnavailable(_) => codes::storage::UNAVAILABLE,
            Self::AttemptInProgress => codes::authentication::ATTEMPT_IN_PROGRESS,
            Self::UnrecognizedRole(_) => codes::authentication::UNRECOGNIZED_ROLE,
            Self::Forbidden => codes::authorization::ACCESS_DENIED,
            Self::Configuration(_) => codes::system::CONFIGURATION,
        }
    }

    /// Category name used as a structured log field
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::InvalidCredentials | Self::UnrecognizedRole(_) | Self::AttemptInProgress => {
                "authentication"
            }
            Self::NetworkUnavailable(_) | Self::ServerError(_) => "network",
            Self::SessionInvalidated => "session",
            Self::StorageUnavailable(_) => "storage",
            Self::Forbidden => "authorization",
            Self::Configuration(_) => "configuration",
        }
    }

    /// Message safe to show to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(detail) => detail.clone(),
            Self::InvalidCredentials => "Invalid email or password.".to_string(),
            Self::NetworkUnavailable(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            Self::ServerError(Some(detail)) if !detail.trim().is_empty() => detail.clone(),
            Self::ServerError(_) => GENERIC_SERVER_MESSAGE.to_string(),
            Self::SessionInvalidated => "Your session has expired. Please log in again.".to_string(),
            Self::StorageUnavailable(_) => {
                "Could not access saved credentials on this device.".to_string()
            }
            Self::AttemptInProgress => "Please wait for the current request to finish.".to_string(),
            Self::UnrecognizedRole(_) => "Invalid user.".to_string(),
            Self::Forbidden => "You do not have access to this screen.".to_string(),
            Self::Configuration(detail) => format!("Configuration problem: {detail}"),
        }
    }

    /// Whether re-submitting the same action may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkUnavailable(_) | Self::AttemptInProgress)
    }

    /// Whether the error already moved the session to the unauthenticated state
    pub fn ends_session(&self) -> bool {
        matches!(self, Self::SessionInvalidated)
    }
}

/// Result type alias for operations surfaced to the user
pub type Result<T> = std::result::Result<T, PlantGuardError>;
