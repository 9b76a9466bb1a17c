// Logger configuration
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit Bunyan-style JSON records instead of human-readable lines
    pub json: bool,
    /// Also write to a daily rolling file in this directory
    pub log_dir: Option<PathBuf>,
    /// Service name attached to JSON records
    pub service_name: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
            log_dir: None,
            service_name: "plantguard".to_string(),
        }
    }
}
