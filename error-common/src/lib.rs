//! Common error handling utilities for the PlantGuard session engine
//!
//! Every crate in the workspace keeps its own error enum. At the boundary
//! where an error is shown to the user (a screen, a CLI command), those
//! enums are converted into [`PlantGuardError`], which carries a stable
//! error code, a user-facing message and a retry hint.
//!
//! # Error Categories
//!
//! - **Validation**: checked locally before any network call, never retried
//! - **InvalidCredentials**: the identity authority rejected a login
//! - **NetworkUnavailable**: timeout or connectivity failure, user may retry
//! - **ServerError**: authority-side failure, detail shown when available
//! - **SessionInvalidated**: stored credential rejected, session torn down
//! - **StorageUnavailable**: the credential store could not be read or written
//!
//! # Example
//!
//! ```rust
//! use error_common::{codes, ErrorReporter, PlantGuardError};
//!
//! let err = PlantGuardError::Validation("last_name is required".into());
//! assert_eq!(err.code(), codes::validation::MISSING_REQUIRED_FIELD);
//! assert!(!err.is_retryable());
//!
//! let message = ErrorReporter::new().report("register", &err);
//! assert_eq!(message, "last_name is required");
//! ```

pub mod codes;
pub mod reporting;
pub mod types;

pub use reporting::*;
pub use types::*;
