//! Session events
//!
//! Event-based communication for observer synchronization. Events are
//! emitted at key points: playlist replacement, confirmed track changes,
//! play/pause changes, periodic position updates, and repeat/shuffle
//! confirmations.

use crate::types::{PlaybackPosition, RepeatMode};
use aria_core::PlaylistKind;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The loaded playlist was replaced wholesale
    PlaylistReplaced {
        /// Name of the new listing
        name: String,
        /// Kind of the new listing
        kind: PlaylistKind,
        /// Number of tracks loaded
        track_count: usize,
    },

    /// The current track changed (confirmed by the engine)
    TrackChanged {
        /// Index of the new current track
        index: usize,
        /// ID of the new current track
        track_id: String,
    },

    /// The engine started or stopped playing
    PlayingChanged {
        /// New playing state
        is_playing: bool,
    },

    /// Periodic position sample
    PositionUpdate(PlaybackPosition),

    /// Repeat mode changed (confirmed by the engine)
    RepeatModeChanged {
        /// New repeat mode
        mode: RepeatMode,
    },

    /// Shuffle flag changed (confirmed by the engine)
    ShuffleChanged {
        /// New shuffle state
        enabled: bool,
    },
}
