use crate::authenticator::RequestAuthenticator;
use crate::error::{GatewayError, Result};
use auth_identity::UserId;
use credential_store::Role;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One account as listed for administrators
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
}

#[derive(Serialize)]
struct RoleUpdate {
    role: Role,
}

/// Administrative user management over authenticated requests
#[derive(Clone)]
pub struct UserDirectory {
    authenticator: Arc<RequestAuthenticator>,
}

impl UserDirectory {
    pub fn new(authenticator: Arc<RequestAuthenticator>) -> Self {
        Self { authenticator }
    }

    pub async fn list_users(&self) -> Result<Vec<UserSummary>> {
        let users: Vec<UserSummary> = self
            .authenticator
            .send_json(Method::GET, "getUsers/", None::<&()>)
            .await?;
        tracing::debug!(count = users.len(), "listed users");
        Ok(users)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_role(&self, user_id: &str, role: Role) -> Result<()> {
        if !role.is_valid() {
            return Err(GatewayError::InvalidRole(role.to_string()));
        }
        let user_id = user_id.trim();
        if user_id.is_empty() || user_id.contains('/') {
            return Err(GatewayError::Configuration(format!("invalid user id `{user_id}`")));
        }

        let path = format!("updateUser/{user_id}/");
        self.authenticator
            .send_expecting_success(Method::PUT, &path, Some(&RoleUpdate { role }))
            .await?;
        tracing::info!("role updated");
        Ok(())
    }
}
