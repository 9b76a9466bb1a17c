use crate::error::{ConfigError, Result};
use crate::ClientConfig;
use credential_store::StoreBackend;

/// Reject settings that would only fail later at first use
pub fn validate(config: &ClientConfig) -> Result<()> {
    config
        .authority
        .base_url()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    if config.authority.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "authority.timeout_secs must be greater than zero".to_string(),
        ));
    }
    if config.authority.password_min_length == 0 {
        return Err(ConfigError::ValidationError(
            "authority.password_min_length must be greater than zero".to_string(),
        ));
    }
    if config.store.backend == StoreBackend::Sqlite && config.store.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "store.max_connections must be greater than zero".to_string(),
        ));
    }
    if config.logging.log_level.trim().is_empty() {
        return Err(ConfigError::ValidationError("logging.log_level must not be empty".to_string()));
    }
    Ok(())
}
