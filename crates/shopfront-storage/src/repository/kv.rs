//! # Key/Value Repository
//!
//! Reads and writes rows of the `kv_store` table.
//!
//! ## Table Layout
//! ```text
//! ┌──────────┬──────────────────────────────────┬──────────────────────────┐
//! │ key (PK) │ value                            │ updated_at               │
//! ├──────────┼──────────────────────────────────┼──────────────────────────┤
//! │ cart     │ [{"product":{...},"quantity":2}] │ 2026-10-19T09:12:44.120Z │
//! └──────────┴──────────────────────────────────┴──────────────────────────┘
//! ```
//!
//! `set` is an upsert: the last write for a key wins.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StorageResult;

/// Repository for key/value rows.
#[derive(Debug, Clone)]
pub struct KeyValueRepository {
    pool: SqlitePool,
}

impl KeyValueRepository {
    /// Creates a new KeyValueRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KeyValueRepository { pool }
    }

    /// Reads the value stored under `key`.
    pub async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        debug!(key = %key, found = value.is_some(), "kv get");
        Ok(value)
    }

    /// Writes `value` under `key`, replacing any previous value.
    pub async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "kv set");
        Ok(())
    }

    /// Deletes `key`. Returns whether a row was removed.
    pub async fn delete(&self, key: &str) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists all stored keys, sorted.
    pub async fn keys(&self) -> StorageResult<Vec<String>> {
        let keys: Vec<String> = sqlx::query_scalar("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        Ok(keys)
    }
}
