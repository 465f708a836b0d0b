//! Core types for the playback session

use aria_core::{PlaylistKind, Track};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Repeat mode for playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the playlist ends
    #[default]
    Off,

    /// Loop the entire playlist
    All,

    /// Loop the current track only
    One,
}

impl RepeatMode {
    /// The next mode in the toggle cycle Off → All → One → Off
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }

    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::All => "all",
            Self::One => "one",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "off" => Some(Self::Off),
            "all" => Some(Self::All),
            "one" => Some(Self::One),
            _ => None,
        }
    }
}

/// A sampled playback position
///
/// Sampled, never owned: only the latest value is kept, published through a
/// `watch` channel to observers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackPosition {
    /// Position within the current track, in milliseconds
    pub position_ms: i64,

    /// Duration of the current track, in milliseconds (0 when unknown)
    pub duration_ms: i64,
}

/// A playlist handed to the session for playback
///
/// The track list is treated as immutable once loaded; any change goes
/// through a wholesale replacement so observers never see a half-updated
/// list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSelection {
    /// Display name of the listing this selection was assembled from
    pub playlist_name: String,

    /// Kind of listing (all, favorites, artist, album, custom)
    pub kind: PlaylistKind,

    /// The ordered tracks; the engine's queue mirrors this exactly
    pub tracks: Vec<Track>,
}

/// Point-in-time view of the session, served over a oneshot reply
///
/// This is the single "what is playing" accessor: `current_track` is derived
/// from the loaded tracks and current index, never duplicated elsewhere.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Name of the loaded listing, if any
    pub playlist_name: Option<String>,

    /// Kind of the loaded listing, if any
    pub kind: Option<PlaylistKind>,

    /// Number of loaded tracks
    pub track_count: usize,

    /// Index of the current track (`None` = nothing loaded)
    pub current_index: Option<usize>,

    /// The current track, if an index is established
    pub current_track: Option<Track>,

    /// Whether the engine reported itself playing
    pub is_playing: bool,

    /// Mirrored repeat mode
    pub repeat_mode: RepeatMode,

    /// Mirrored shuffle flag
    pub shuffle_enabled: bool,

    /// Last sampled position
    pub position: PlaybackPosition,

    /// Whether a restore is still in flight (persistence suppressed)
    pub restoring: bool,
}

/// Configuration for the playback session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Interval between position samples
    pub sample_interval: Duration,

    /// Minimum distance from the last persisted position before a sample
    /// becomes a persistence candidate
    pub persist_threshold_ms: i64,

    /// How long a candidate must stand unchanged before it is written
    pub persist_debounce: Duration,

    /// Delay after the engine confirms a restore seek before normal
    /// persistence resumes
    pub restore_settle: Duration,

    /// Buffer size of the session event channel
    pub event_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sample_interval: Duration::from_millis(500),
            persist_threshold_ms: 5000,
            persist_debounce: Duration::from_millis(5000),
            restore_settle: Duration::from_millis(200),
            event_capacity: 64,
        }
    }
}
