use crate::error::{IdentityError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Base URL every endpoint path is resolved against
    pub base_url: String,
    /// Whole-request timeout; exceeding it is reported as a network failure
    pub timeout_secs: u64,
    /// Minimum length for a new password during recovery
    pub password_min_length: usize,
    pub user_agent: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/".to_string(),
            timeout_secs: 30,
            password_min_length: 6,
            user_agent: format!("plantguard/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl IdentityConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parsed base URL, always ending in `/` so relative joins keep the prefix
    pub fn base_url(&self) -> Result<Url> {
        let mut url = Url::parse(self.base_url.trim())
            .map_err(|e| IdentityError::Configuration(format!("invalid base_url: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(IdentityError::Configuration(format!(
                "base_url `{}` cannot be used as a base",
                self.base_url
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}
