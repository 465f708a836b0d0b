//! Metadata overrides
//!
//! User edits layered over scanned metadata. One row per track id; NULL
//! columns mean "no override for that field". The overlay stage reads the
//! whole mapping every time a track list is materialized.

use crate::error::Result;
use aria_core::{MetadataOverride, TrackId};
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;

/// Create or update the override for a track
///
/// Saving an override with no fields at all removes the row instead.
pub async fn upsert(pool: &SqlitePool, track_id: &TrackId, ov: &MetadataOverride) -> Result<()> {
    if ov.is_empty() {
        delete(pool, track_id).await?;
        return Ok(());
    }

    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        r#"
        INSERT INTO metadata_overrides (track_id, title, artist, album, cover_path, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(track_id) DO UPDATE SET
            title = excluded.title,
            artist = excluded.artist,
            album = excluded.album,
            cover_path = excluded.cover_path,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(track_id.as_str())
    .bind(&ov.title)
    .bind(&ov.artist)
    .bind(&ov.album)
    .bind(&ov.cover_path)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get the override for a track, if any
pub async fn get(pool: &SqlitePool, track_id: &TrackId) -> Result<Option<MetadataOverride>> {
    let row = sqlx::query(
        "SELECT title, artist, album, cover_path FROM metadata_overrides WHERE track_id = ?",
    )
    .bind(track_id.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| MetadataOverride {
        title: row.get("title"),
        artist: row.get("artist"),
        album: row.get("album"),
        cover_path: row.get("cover_path"),
    }))
}

/// Get all overrides, keyed by track id
pub async fn get_all(pool: &SqlitePool) -> Result<HashMap<TrackId, MetadataOverride>> {
    let rows = sqlx::query("SELECT track_id, title, artist, album, cover_path FROM metadata_overrides")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            (
                TrackId::new(row.get::<String, _>("track_id")),
                MetadataOverride {
                    title: row.get("title"),
                    artist: row.get("artist"),
                    album: row.get("album"),
                    cover_path: row.get("cover_path"),
                },
            )
        })
        .collect())
}

/// Remove the override for a track
///
/// Returns `true` if an override was removed
pub async fn delete(pool: &SqlitePool, track_id: &TrackId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM metadata_overrides WHERE track_id = ?")
        .bind(track_id.as_str())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
