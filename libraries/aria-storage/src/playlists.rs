//! User playlists
//!
//! Playlists own an ordered, deduplicated sequence of track-id references
//! with explicit integer positions. Positions need not be gap-free; only
//! relative order matters, and the assembler resolves the ids against the
//! current track set (silently dropping ids whose tracks are gone).

use crate::error::{Result, StorageError};
use aria_core::{Playlist, PlaylistId, PlaylistTrackRef, TrackId};
use sqlx::{Row, SqlitePool};

/// Create a new playlist
pub async fn create(pool: &SqlitePool, name: &str) -> Result<Playlist> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query(
        r#"
        INSERT INTO playlists (name, created_at, updated_at)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(name)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("Playlist", id.to_string()))
}

/// Get a playlist by ID (without tracks)
pub async fn get_by_id(pool: &SqlitePool, id: PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query(
        "SELECT id, name, cover_path, created_at, updated_at FROM playlists WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Playlist {
        id: row.get("id"),
        name: row.get("name"),
        cover_path: row.get("cover_path"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        tracks: None,
    }))
}

/// Get all playlists, most recently updated first
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(
        "SELECT id, name, cover_path, created_at, updated_at FROM playlists ORDER BY updated_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Playlist {
            id: row.get("id"),
            name: row.get("name"),
            cover_path: row.get("cover_path"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
            tracks: None,
        })
        .collect())
}

/// Get a playlist with its ordered track references
pub async fn get_with_tracks(pool: &SqlitePool, id: PlaylistId) -> Result<Option<Playlist>> {
    let Some(mut playlist) = get_by_id(pool, id).await? else {
        return Ok(None);
    };

    playlist.tracks = Some(get_track_refs(pool, id).await?);

    Ok(Some(playlist))
}

/// Get a playlist's ordered track references
pub async fn get_track_refs(pool: &SqlitePool, id: PlaylistId) -> Result<Vec<PlaylistTrackRef>> {
    let rows = sqlx::query(
        r#"
        SELECT track_id, position, added_at
        FROM playlist_tracks
        WHERE playlist_id = ?
        ORDER BY position
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| PlaylistTrackRef {
            track_id: TrackId::new(row.get::<String, _>("track_id")),
            position: row.get("position"),
            added_at: row.get("added_at"),
        })
        .collect())
}

/// Get a playlist's ordered track ids, for custom-listing assembly
pub async fn get_track_ids(pool: &SqlitePool, id: PlaylistId) -> Result<Vec<TrackId>> {
    Ok(get_track_refs(pool, id)
        .await?
        .into_iter()
        .map(|r| r.track_id)
        .collect())
}

/// Rename a playlist
pub async fn rename(pool: &SqlitePool, id: PlaylistId, name: &str) -> Result<()> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query("UPDATE playlists SET name = ?, updated_at = ? WHERE id = ?")
        .bind(name)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Playlist", id.to_string()));
    }

    Ok(())
}

/// Set or clear a playlist's cover image
pub async fn set_cover(pool: &SqlitePool, id: PlaylistId, cover_path: Option<&str>) -> Result<()> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query("UPDATE playlists SET cover_path = ?, updated_at = ? WHERE id = ?")
        .bind(cover_path)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Playlist", id.to_string()));
    }

    Ok(())
}

/// Delete a playlist
///
/// Track references are removed by the cascading foreign key.
pub async fn delete(pool: &SqlitePool, id: PlaylistId) -> Result<()> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Playlist", id.to_string()));
    }

    Ok(())
}

/// Append a track to a playlist
///
/// Adding a track that is already in the playlist is a no-op: the reference
/// sequence stays deduplicated.
pub async fn add_track(pool: &SqlitePool, playlist_id: PlaylistId, track_id: &TrackId) -> Result<()> {
    if get_by_id(pool, playlist_id).await?.is_none() {
        return Err(StorageError::not_found("Playlist", playlist_id.to_string()));
    }

    let next_position_row = sqlx::query(
        "SELECT COALESCE(MAX(position), 0) + 1 AS next_pos FROM playlist_tracks WHERE playlist_id = ?",
    )
    .bind(playlist_id)
    .fetch_one(pool)
    .await?;

    let next_position: i64 = next_position_row.get("next_pos");
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        r#"
        INSERT INTO playlist_tracks (playlist_id, track_id, position, added_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(playlist_id, track_id) DO NOTHING
        "#,
    )
    .bind(playlist_id)
    .bind(track_id.as_str())
    .bind(next_position)
    .bind(now)
    .execute(pool)
    .await?;

    touch(pool, playlist_id).await
}

/// Remove a track from a playlist
///
/// Remaining positions are left as-is: gaps are fine, relative order is what
/// matters.
pub async fn remove_track(
    pool: &SqlitePool,
    playlist_id: PlaylistId,
    track_id: &TrackId,
) -> Result<()> {
    sqlx::query("DELETE FROM playlist_tracks WHERE playlist_id = ? AND track_id = ?")
        .bind(playlist_id)
        .bind(track_id.as_str())
        .execute(pool)
        .await?;

    touch(pool, playlist_id).await
}

/// Move a track to a new position within a playlist
pub async fn reorder_track(
    pool: &SqlitePool,
    playlist_id: PlaylistId,
    track_id: &TrackId,
    new_position: i64,
) -> Result<()> {
    let mut tx = pool.begin().await?;

    let current = sqlx::query(
        "SELECT position FROM playlist_tracks WHERE playlist_id = ? AND track_id = ?",
    )
    .bind(playlist_id)
    .bind(track_id.as_str())
    .fetch_optional(&mut *tx)
    .await?;

    let Some(current) = current else {
        return Err(StorageError::not_found("Playlist track", track_id.to_string()));
    };

    let old_position: i64 = current.get("position");

    if old_position == new_position {
        return Ok(());
    }

    if new_position < old_position {
        // Moving up: shift the tracks in between down.
        sqlx::query(
            r#"
            UPDATE playlist_tracks
            SET position = position + 1
            WHERE playlist_id = ? AND position >= ? AND position < ?
            "#,
        )
        .bind(playlist_id)
        .bind(new_position)
        .bind(old_position)
        .execute(&mut *tx)
        .await?;
    } else {
        // Moving down: shift the tracks in between up.
        sqlx::query(
            r#"
            UPDATE playlist_tracks
            SET position = position - 1
            WHERE playlist_id = ? AND position > ? AND position <= ?
            "#,
        )
        .bind(playlist_id)
        .bind(old_position)
        .bind(new_position)
        .execute(&mut *tx)
        .await?;
    }

    sqlx::query("UPDATE playlist_tracks SET position = ? WHERE playlist_id = ? AND track_id = ?")
        .bind(new_position)
        .bind(playlist_id)
        .bind(track_id.as_str())
        .execute(&mut *tx)
        .await?;

    let now = chrono::Utc::now().timestamp();
    sqlx::query("UPDATE playlists SET updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(playlist_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}

async fn touch(pool: &SqlitePool, playlist_id: PlaylistId) -> Result<()> {
    let now = chrono::Utc::now().timestamp();

    sqlx::query("UPDATE playlists SET updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(playlist_id)
        .execute(pool)
        .await?;

    Ok(())
}
