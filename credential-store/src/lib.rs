//! Durable storage for the session credential set
//!
//! A credential set (access token, refresh token, role, user id) is either
//! fully present or fully absent. Implementations guarantee that:
//!
//! - `put` replaces all four keys at once
//! - `get` never returns a mix of two sets, and reports partial data as absent
//! - `clear` removes all four keys at once
//!
//! Storage failures surface as [`StoreError::Unavailable`]; callers must not
//! treat them as "no session" and carry on.

pub mod config;
pub mod error;
pub mod memory;
pub mod models;
pub mod sqlite;

pub use config::{open_store, StoreBackend, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryCredentialStore;
pub use models::{CredentialSet, Role, CREDENTIAL_KEYS};
pub use sqlite::SqliteCredentialStore;

use async_trait::async_trait;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Replace the stored set
    async fn put(&self, set: &CredentialSet) -> StoreResult<()>;

    /// Current set, or `None` when absent or incomplete
    async fn get(&self) -> StoreResult<Option<CredentialSet>>;

    /// Remove every credential key
    async fn clear(&self) -> StoreResult<()>;

    /// Clear only when the stored access token equals `access_token`
    ///
    /// Returns whether anything was removed.
    async fn clear_if_token(&self, access_token: &str) -> StoreResult<bool>;

    /// Access token of the current set, if any
    async fn access_token(&self) -> StoreResult<Option<String>> {
        Ok(self.get().await?.map(|set| set.access_token))
    }
}
