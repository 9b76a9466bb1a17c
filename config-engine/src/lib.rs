//! Layered configuration for the PlantGuard client
//!
//! Sources, lowest precedence first:
//! - Built-in defaults
//! - An optional YAML, TOML or JSON file
//! - `PLANTGUARD__`-prefixed environment variables, `__` between levels
//!   (`PLANTGUARD__AUTHORITY__BASE_URL`, `PLANTGUARD__STORE__BACKEND`)
//!
//! The merged result is validated before it is returned.
//!
//! # Example
//!
//! ```rust,no_run
//! let config = config_engine::load(None)?;
//! println!("authority at {}", config.authority.base_url);
//! # Ok::<(), config_engine::ConfigError>(())
//! ```

pub mod error;
pub mod providers;
pub mod validation;

pub use error::*;

use auth_identity::IdentityConfig;
use config::{Config, Map};
use credential_store::StoreConfig;
use logger_redacted::LoggerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub authority: IdentityConfig,
    pub store: StoreConfig,
    pub logging: LoggerConfig,
}

/// Load from `path` (if any) and the process environment
pub fn load(path: Option<&Path>) -> Result<ClientConfig> {
    load_with_env(path, None)
}

/// Load with an explicit environment map instead of the process environment
pub fn load_with_env(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<ClientConfig> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::SourceNotFound(path.display().to_string()));
        }
        builder = builder.add_source(providers::file_source(path));
    }
    builder = builder.add_source(providers::env_source(env));

    let mut config: ClientConfig = builder.build()?.try_deserialize()?;
    if config.store.path.is_none() {
        config.store.path = Some(providers::default_store_path());
    }

    validation::validate(&config)?;
    tracing::debug!(
        base_url = %config.authority.base_url,
        backend = ?config.store.backend,
        "configuration loaded"
    );
    Ok(config)
}
