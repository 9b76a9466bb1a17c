use crate::error::Result;
use crate::models::{LoginGrant, RegistrationProfile};
use async_trait::async_trait;

/// Remote service that validates credentials and issues tokens
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait IdentityAuthority: Send + Sync {
    /// Exchange an identifier and secret for a [`LoginGrant`]
    async fn login(&self, identifier: &str, secret: &str) -> Result<LoginGrant>;

    /// Create an account; client-checkable problems fail before any request
    async fn register(&self, profile: &RegistrationProfile) -> Result<()>;

    /// Recovery step 1
    async fn verify_email_exists(&self, email: &str) -> Result<bool>;

    /// Recovery step 2
    async fn reset_password(&self, email: &str, new_secret: &str, confirm_secret: &str) -> Result<()>;
}
