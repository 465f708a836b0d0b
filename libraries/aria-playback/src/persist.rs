//! Persistence gateway
//!
//! Writes the "where was the user" record through the [`KeyValueStore`]
//! collaborator. Writes are fire-and-forget so they never block the sampler
//! loop; errors are logged and swallowed, and the next write supersedes a
//! failed one. Playback must stay usable with persistence entirely
//! unavailable.

use aria_core::{KeyValueStore, TrackId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Store key for the last played track id
pub const KEY_LAST_TRACK_ID: &str = "playback.last_track_id";

/// Store key for the last observed position
pub const KEY_LAST_POSITION_MS: &str = "playback.last_position_ms";

/// The single persisted playback record, overwritten in place
///
/// `last_position_ms` always corresponds to a position actually observed for
/// `last_track_id`: the session writes position 0 in the same logical step
/// as every track-id write, so a reader never sees a new track id paired
/// with a stale prior track's position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedPlaybackRecord {
    /// ID of the last played track, if any
    pub last_track_id: Option<String>,

    /// Last observed position within that track, in milliseconds
    pub last_position_ms: i64,
}

/// Gateway between the session task and the key-value store
#[derive(Clone)]
pub struct PersistenceGateway {
    store: Arc<dyn KeyValueStore>,
}

impl PersistenceGateway {
    /// Create a gateway over the given store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the persisted record
    ///
    /// A read failure yields the default record: nothing to restore.
    pub async fn load(&self) -> PersistedPlaybackRecord {
        let last_track_id = match self.store.get_string(KEY_LAST_TRACK_ID).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Failed to read persisted track id: {e}");
                None
            }
        };
        let last_position_ms = match self.store.get_i64(KEY_LAST_POSITION_MS).await {
            Ok(ms) => ms.unwrap_or(0),
            Err(e) => {
                tracing::warn!("Failed to read persisted position: {e}");
                0
            }
        };

        PersistedPlaybackRecord {
            last_track_id,
            last_position_ms,
        }
    }

    /// Write the position without blocking the caller
    pub fn write_position(&self, position_ms: i64) {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if let Err(e) = store.set_i64(KEY_LAST_POSITION_MS, position_ms).await {
                tracing::warn!("Failed to persist position {position_ms}: {e}");
            }
        });
    }

    /// Write the track id without blocking the caller
    pub fn write_track_id(&self, track_id: &TrackId) {
        let store = Arc::clone(&self.store);
        let track_id = track_id.to_string();
        tokio::spawn(async move {
            if let Err(e) = store.set_string(KEY_LAST_TRACK_ID, &track_id).await {
                tracing::warn!("Failed to persist track id {track_id}: {e}");
            }
        });
    }

    /// Write the position and wait for the store
    ///
    /// Used on session shutdown, where a pending debounced value must be
    /// flushed rather than dropped.
    pub async fn flush_position(&self, position_ms: i64) {
        if let Err(e) = self.store.set_i64(KEY_LAST_POSITION_MS, position_ms).await {
            tracing::warn!("Failed to flush position {position_ms}: {e}");
        }
    }
}
