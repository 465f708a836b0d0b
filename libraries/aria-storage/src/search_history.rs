//! Search history
//!
//! A bounded, newest-first list of past search queries. Re-searching an
//! existing query (in any casing) moves it to the top instead of adding a
//! duplicate; recording beyond the bound prunes the oldest entries.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};

/// Maximum number of history entries kept
pub const MAX_ENTRIES: i64 = 20;

/// A past search query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryItem {
    /// The query text as last entered
    pub query: String,

    /// When it was last searched (Unix epoch milliseconds)
    pub searched_at: i64,
}

/// Record a search query
///
/// Empty and whitespace-only queries are ignored. Dedup is case-insensitive
/// (NOCASE primary key); a repeated query moves to the top with its most
/// recent casing. REPLACE gives the row a fresh rowid, which doubles as the
/// recency tiebreaker for same-millisecond records.
pub async fn record(pool: &SqlitePool, query: &str) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(());
    }

    let now = chrono::Utc::now().timestamp_millis();

    sqlx::query("INSERT OR REPLACE INTO search_history (query, searched_at) VALUES (?, ?)")
        .bind(query)
        .bind(now)
        .execute(pool)
        .await?;

    // Keep only the newest entries.
    sqlx::query(
        r#"
        DELETE FROM search_history
        WHERE query NOT IN (
            SELECT query FROM search_history
            ORDER BY searched_at DESC, rowid DESC
            LIMIT ?
        )
        "#,
    )
    .bind(MAX_ENTRIES)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get the history, newest first
pub async fn get_recent(pool: &SqlitePool) -> Result<Vec<SearchHistoryItem>> {
    let rows = sqlx::query(
        r#"
        SELECT query, searched_at
        FROM search_history
        ORDER BY searched_at DESC, rowid DESC
        LIMIT ?
        "#,
    )
    .bind(MAX_ENTRIES)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| SearchHistoryItem {
            query: row.get("query"),
            searched_at: row.get("searched_at"),
        })
        .collect())
}

/// Clear the history
///
/// Returns the number of removed entries
pub async fn clear(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM search_history")
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
