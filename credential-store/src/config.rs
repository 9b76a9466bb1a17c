use crate::error::StoreResult;
use crate::memory::MemoryCredentialStore;
use crate::sqlite::SqliteCredentialStore;
use crate::CredentialStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_DB_FILE: &str = "plantguard_credentials.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Database file; `DEFAULT_DB_FILE` in the working directory when unset
    pub path: Option<PathBuf>,
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            path: None,
            max_connections: 4,
        }
    }
}

/// Open the store selected by `config`
pub async fn open_store(config: &StoreConfig) -> StoreResult<Arc<dyn CredentialStore>> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryCredentialStore::new())),
        StoreBackend::Sqlite => {
            let path = config
                .path
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE));
            tracing::info!(path = %path.display(), "opening credential store");
            let store = SqliteCredentialStore::open(path, config.max_connections).await?;
            Ok(Arc::new(store))
        }
    }
}
