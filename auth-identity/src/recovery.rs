//! Two-step password recovery
//!
//! Step 1 asks the authority whether the email is registered. Step 2 is only
//! accepted for the email that step 1 confirmed in the same flow.

use crate::authority::IdentityAuthority;
use crate::error::{IdentityError, Result};
use crate::validation::normalize_identifier;

#[derive(Debug, Default)]
pub struct RecoveryFlow {
    verified_email: Option<String>,
}

impl RecoveryFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verified_email(&self) -> Option<&str> {
        self.verified_email.as_deref()
    }

    pub async fn verify_email(&mut self, authority: &dyn IdentityAuthority, email: &str) -> Result<bool> {
        let email = normalize_identifier(email);
        self.verified_email = None;

        let exists = authority.verify_email_exists(&email).await?;
        if exists {
            self.verified_email = Some(email);
        }
        Ok(exists)
    }

    pub async fn reset_password(
        &mut self,
        authority: &dyn IdentityAuthority,
        email: &str,
        new_secret: &str,
        confirm_secret: &str,
    ) -> Result<()> {
        let email = normalize_identifier(email);
        if self.verified_email.as_deref() != Some(email.as_str()) {
            return Err(IdentityError::EmailNotVerified);
        }

        authority.reset_password(&email, new_secret, confirm_secret).await?;
        self.verified_email = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::MockIdentityAuthority;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn reset_without_verification_is_rejected() {
        let mut authority = MockIdentityAuthority::new();
        authority.expect_reset_password().times(0);

        let mut flow = RecoveryFlow::new();
        let err = flow
            .reset_password(&authority, "ana@x.com", "secret1", "secret1")
            .await
            .unwrap_err();
        assert_eq!(err, IdentityError::EmailNotVerified);
    }

    #[tokio::test]
    async fn unknown_email_keeps_step_two_locked() {
        let mut authority = MockIdentityAuthority::new();
        authority
            .expect_verify_email_exists()
            .with(eq("ghost@x.com"))
            .times(1)
            .returning(|_| Ok(false));
        authority.expect_reset_password().times(0);

        let mut flow = RecoveryFlow::new();
        assert!(!flow.verify_email(&authority, "ghost@x.com").await.unwrap());
        assert!(flow
            .reset_password(&authority, "ghost@x.com", "secret1", "secret1")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn step_two_must_use_the_verified_email() {
        let mut authority = MockIdentityAuthority::new();
        authority.expect_verify_email_exists().returning(|_| Ok(true));
        authority.expect_reset_password().times(0);

        let mut flow = RecoveryFlow::new();
        assert!(flow.verify_email(&authority, "ana@x.com").await.unwrap());
        let err = flow
            .reset_password(&authority, "other@x.com", "secret1", "secret1")
            .await
            .unwrap_err();
        assert_eq!(err, IdentityError::EmailNotVerified);
    }

    #[tokio::test]
    async fn verified_email_unlocks_one_reset() {
        let mut authority = MockIdentityAuthority::new();
        authority
            .expect_verify_email_exists()
            .with(eq("ana@x.com"))
            .returning(|_| Ok(true));
        authority
            .expect_reset_password()
            .with(eq("ana@x.com"), eq("secret1"), eq("secret1"))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut flow = RecoveryFlow::new();
        assert!(flow.verify_email(&authority, "  Ana@X.com").await.unwrap());
        assert_eq!(flow.verified_email(), Some("ana@x.com"));

        flow.reset_password(&authority, "ana@x.com", "secret1", "secret1")
            .await
            .unwrap();

        // The flow is spent after a successful reset
        assert_eq!(flow.verified_email(), None);
        assert_eq!(
            flow.reset_password(&authority, "ana@x.com", "secret1", "secret1").await,
            Err(IdentityError::EmailNotVerified)
        );
    }

    #[tokio::test]
    async fn failed_reset_keeps_the_flow_open() {
        let mut authority = MockIdentityAuthority::new();
        authority.expect_verify_email_exists().returning(|_| Ok(true));
        authority
            .expect_reset_password()
            .times(1)
            .returning(|_, _, _| Err(IdentityError::Validation("passwords do not match".into())));

        let mut flow = RecoveryFlow::new();
        flow.verify_email(&authority, "ana@x.com").await.unwrap();
        assert!(flow
            .reset_password(&authority, "ana@x.com", "secret1", "secret2")
            .await
            .is_err());
        assert_eq!(flow.verified_email(), Some("ana@x.com"));
    }
}
