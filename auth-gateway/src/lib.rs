//! Authenticated requests for the PlantGuard client
//!
//! [`RequestAuthenticator`] attaches the stored access token to outgoing
//! requests and turns an authority rejection into a cleared session plus a
//! single [`SessionEvent::Invalidated`]. [`UserDirectory`] builds the
//! administrator operations on top of it.

pub mod authenticator;
pub mod directory;
pub mod error;

pub use authenticator::{RequestAuthenticator, SessionEvent};
pub use directory::{UserDirectory, UserSummary};
pub use error::{GatewayError, Result};
