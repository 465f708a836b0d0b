//! Favorite tracks
//!
//! A set of starred track ids, read as a whole by the overlay stage.

use crate::error::Result;
use aria_core::TrackId;
use sqlx::{Row, SqlitePool};
use std::collections::HashSet;

/// Mark a track as favorite (already-favorite is a no-op)
pub async fn add(pool: &SqlitePool, track_id: &TrackId) -> Result<()> {
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        r#"
        INSERT INTO favorites (track_id, added_at)
        VALUES (?, ?)
        ON CONFLICT(track_id) DO NOTHING
        "#,
    )
    .bind(track_id.as_str())
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Unmark a track as favorite
///
/// Returns `true` if the track was a favorite
pub async fn remove(pool: &SqlitePool, track_id: &TrackId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM favorites WHERE track_id = ?")
        .bind(track_id.as_str())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Flip a track's favorite state, returning the new state
pub async fn toggle(pool: &SqlitePool, track_id: &TrackId) -> Result<bool> {
    if remove(pool, track_id).await? {
        Ok(false)
    } else {
        add(pool, track_id).await?;
        Ok(true)
    }
}

/// Check whether a track is a favorite
pub async fn is_favorite(pool: &SqlitePool, track_id: &TrackId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 AS present FROM favorites WHERE track_id = ?")
        .bind(track_id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// Get all favorite track ids
pub async fn get_all(pool: &SqlitePool) -> Result<HashSet<TrackId>> {
    let rows = sqlx::query("SELECT track_id FROM favorites")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| TrackId::new(row.get::<String, _>("track_id")))
        .collect())
}
