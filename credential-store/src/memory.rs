//! Process-local credential store

use crate::error::StoreResult;
use crate::models::CredentialSet;
use crate::CredentialStore;
use async_trait::async_trait;
use parking_lot::RwLock;

/// Keeps the credential set in memory; nothing survives a restart
#[derive(Default)]
pub struct MemoryCredentialStore {
    current: RwLock<Option<CredentialSet>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn put(&self, set: &CredentialSet) -> StoreResult<()> {
        set.validate()?;
        *self.current.write() = Some(set.clone());
        Ok(())
    }

    async fn get(&self) -> StoreResult<Option<CredentialSet>> {
        Ok(self.current.read().clone())
    }

    async fn clear(&self) -> StoreResult<()> {
        self.current.write().take();
        Ok(())
    }

    async fn clear_if_token(&self, access_token: &str) -> StoreResult<bool> {
        let mut current = self.current.write();
        match current.as_ref() {
            Some(set) if set.access_token == access_token => {
                *current = None;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
