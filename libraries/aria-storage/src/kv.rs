//! Key-value state
//!
//! Small durable values: the persisted playback record, scope folder set,
//! and user preferences. Values are stored as text; integer accessors parse
//! on the way out, matching the string/int surface of
//! [`aria_core::KeyValueStore`].

use crate::error::{Result, StorageError};
use aria_core::{AriaError, KeyValueStore};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

/// Get a value
pub async fn get(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let row = sqlx::query("SELECT value FROM kv_state WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| row.get("value")))
}

/// Set a value, overwriting any previous one
pub async fn set(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        r#"
        INSERT INTO kv_state (key, value, updated_at)
        VALUES (?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get an integer value
///
/// A value that exists but does not parse is reported as a serialization
/// error rather than silently dropped.
pub async fn get_i64(pool: &SqlitePool, key: &str) -> Result<Option<i64>> {
    match get(pool, key).await? {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| StorageError::Serialization(format!("{key} is not an integer: {value}"))),
        None => Ok(None),
    }
}

/// Set an integer value
pub async fn set_i64(pool: &SqlitePool, key: &str, value: i64) -> Result<()> {
    set(pool, key, &value.to_string()).await
}

/// Remove a value
///
/// Returns `true` if a value was removed
pub async fn remove(pool: &SqlitePool, key: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM kv_state WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// [`KeyValueStore`] implementation over the local database
///
/// Handed to the playback session as its persistence collaborator.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a store over an open pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get_string(&self, key: &str) -> aria_core::Result<Option<String>> {
        get(&self.pool, key).await.map_err(AriaError::from)
    }

    async fn set_string(&self, key: &str, value: &str) -> aria_core::Result<()> {
        set(&self.pool, key, value).await.map_err(AriaError::from)
    }

    async fn get_i64(&self, key: &str) -> aria_core::Result<Option<i64>> {
        get_i64(&self.pool, key).await.map_err(AriaError::from)
    }

    async fn set_i64(&self, key: &str, value: i64) -> aria_core::Result<()> {
        set_i64(&self.pool, key, value).await.map_err(AriaError::from)
    }

    async fn remove(&self, key: &str) -> aria_core::Result<()> {
        remove(&self.pool, key)
            .await
            .map(|_| ())
            .map_err(AriaError::from)
    }
}
