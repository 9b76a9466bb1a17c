use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_ROLE_KEY: &str = "user_role";
pub const USER_ID_KEY: &str = "user_id";

/// Keys written together on login and removed together on logout
pub const CREDENTIAL_KEYS: [&str; 4] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_ROLE_KEY, USER_ID_KEY];

/// Closed set of roles the authority can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Staff,
    Usuario,
    /// Anything the authority sends that is not one of the above
    Invalid,
}

impl Role {
    /// Case-insensitive parse; unknown values become [`Role::Invalid`]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "admin" => Role::Admin,
            "staff" => Role::Staff,
            "usuario" => Role::Usuario,
            _ => Role::Invalid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Usuario => "usuario",
            Role::Invalid => "invalid",
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Role::Invalid)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Role::parse(&raw))
    }
}

/// Everything issued by one successful login
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSet {
    pub access_token: String,
    pub refresh_token: String,
    pub role: Role,
    pub user_id: String,
}

impl CredentialSet {
    /// Build a set, rejecting empty fields and unroutable roles
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        role: Role,
        user_id: impl Into<String>,
    ) -> StoreResult<Self> {
        let set = Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            role,
            user_id: user_id.into(),
        };
        set.validate()?;
        Ok(set)
    }

    pub fn validate(&self) -> StoreResult<()> {
        if self.access_token.is_empty() {
            return Err(StoreError::Incomplete(ACCESS_TOKEN_KEY));
        }
        if self.refresh_token.is_empty() {
            return Err(StoreError::Incomplete(REFRESH_TOKEN_KEY));
        }
        if !self.role.is_valid() {
            return Err(StoreError::Incomplete(USER_ROLE_KEY));
        }
        if self.user_id.is_empty() {
            return Err(StoreError::Incomplete(USER_ID_KEY));
        }
        Ok(())
    }

    pub(crate) fn entries(&self) -> [(&'static str, &str); 4] {
        [
            (ACCESS_TOKEN_KEY, self.access_token.as_str()),
            (REFRESH_TOKEN_KEY, self.refresh_token.as_str()),
            (USER_ROLE_KEY, self.role.as_str()),
            (USER_ID_KEY, self.user_id.as_str()),
        ]
    }

    /// Rebuild from stored key/value pairs; partial or inconsistent data is `None`
    pub(crate) fn from_entries(entries: &HashMap<String, String>) -> Option<Self> {
        let set = Self {
            access_token: entries.get(ACCESS_TOKEN_KEY)?.clone(),
            refresh_token: entries.get(REFRESH_TOKEN_KEY)?.clone(),
            role: Role::parse(entries.get(USER_ROLE_KEY)?),
            user_id: entries.get(USER_ID_KEY)?.clone(),
        };
        set.validate().ok().map(|()| set)
    }
}

impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSet")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("role", &self.role)
            .field("user_id", &self.user_id)
            .finish()
    }
}
