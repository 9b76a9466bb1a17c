//! SQLite-backed credential store
//!
//! Credentials live in a single key/value table. Writes go through one
//! transaction and reads through one statement, so a reader racing a
//! `put` or `clear` sees either the old set or the new one.

use crate::error::StoreResult;
use crate::models::{CredentialSet, ACCESS_TOKEN_KEY, CREDENTIAL_KEYS};
use crate::CredentialStore;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub struct SqliteCredentialStore {
    pool: SqlitePool,
}

impl SqliteCredentialStore {
    /// Open (creating if needed) the credential database at `path`
    pub async fn open(path: impl AsRef<Path>, max_connections: u32) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            // Overwrite freed pages so cleared tokens do not linger on disk
            .pragma("secure_delete", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, creating the schema if it is missing
    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        let store = Self { pool };
        store.initialize_schema().await?;
        tracing::debug!("credential store ready");
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn initialize_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS credentials (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn put(&self, set: &CredentialSet) -> StoreResult<()> {
        set.validate()?;

        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM credentials WHERE key IN (?, ?, ?, ?)")
            .bind(CREDENTIAL_KEYS[0])
            .bind(CREDENTIAL_KEYS[1])
            .bind(CREDENTIAL_KEYS[2])
            .bind(CREDENTIAL_KEYS[3])
            .execute(&mut *tx)
            .await?;

        for (key, value) in set.entries() {
            sqlx::query("INSERT INTO credentials (key, value, updated_at) VALUES (?, ?, ?)")
                .bind(key)
                .bind(value)
                .bind(&now)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        tracing::debug!(role = %set.role, "credential set stored");
        Ok(())
    }

    async fn get(&self) -> StoreResult<Option<CredentialSet>> {
        let rows = sqlx::query("SELECT key, value FROM credentials WHERE key IN (?, ?, ?, ?)")
            .bind(CREDENTIAL_KEYS[0])
            .bind(CREDENTIAL_KEYS[1])
            .bind(CREDENTIAL_KEYS[2])
            .bind(CREDENTIAL_KEYS[3])
            .fetch_all(&self.pool)
            .await?;

        let mut entries = HashMap::with_capacity(rows.len());
        for row in &rows {
            let key: String = row.try_get("key")?;
            let value: String = row.try_get("value")?;
            entries.insert(key, value);
        }

        let set = CredentialSet::from_entries(&entries);
        if set.is_none() && !entries.is_empty() {
            tracing::warn!(keys = entries.len(), "ignoring partial credential set");
        }
        Ok(set)
    }

    async fn clear(&self) -> StoreResult<()> {
        sqlx::query("DELETE FROM credentials WHERE key IN (?, ?, ?, ?)")
            .bind(CREDENTIAL_KEYS[0])
            .bind(CREDENTIAL_KEYS[1])
            .bind(CREDENTIAL_KEYS[2])
            .bind(CREDENTIAL_KEYS[3])
            .execute(&self.pool)
            .await?;

        tracing::debug!("credential set cleared");
        Ok(())
    }

    async fn clear_if_token(&self, access_token: &str) -> StoreResult<bool> {
        // The uncorrelated subquery is evaluated once, before any row is removed.
        let result = sqlx::query(
            r#"
            DELETE FROM credentials
            WHERE key IN (?, ?, ?, ?)
              AND EXISTS (SELECT 1 FROM credentials WHERE key = ? AND value = ?)
            "#,
        )
        .bind(CREDENTIAL_KEYS[0])
        .bind(CREDENTIAL_KEYS[1])
        .bind(CREDENTIAL_KEYS[2])
        .bind(CREDENTIAL_KEYS[3])
        .bind(ACCESS_TOKEN_KEY)
        .bind(access_token)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
