//! Identity authority client for the PlantGuard session engine
//!
//! This crate talks to the remote service that owns user accounts:
//! - Login, returning the access/refresh tokens, role and user id
//! - Account registration with local, fail-fast validation
//! - Two-step password recovery ([`RecoveryFlow`])
//!
//! Every response is decoded into an explicit type right after the call;
//! anything that does not match is reported as a server error. Requests are
//! bounded by the configured timeout and a timeout is reported as
//! [`IdentityError::NetworkUnavailable`].
//!
//! # Example
//!
//! ```rust,no_run
//! use auth_identity::{IdentityAuthority, IdentityClient, IdentityConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = IdentityClient::new(IdentityConfig::default())?;
//!     let grant = client.login("admin@x.com", "secret").await?;
//!     println!("logged in with role {}", grant.role);
//!     Ok(())
//! }
//! ```

pub mod authority;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod recovery;
pub mod validation;

pub use authority::*;
pub use client::*;
pub use config::*;
pub use error::*;
pub use models::*;
pub use recovery::*;
