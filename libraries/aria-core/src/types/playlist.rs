/// Playlist domain types
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// Playlist identifier (storage rowid)
pub type PlaylistId = i64;

/// The kind of listing a playback selection was assembled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistKind {
    /// Every track in the library
    #[default]
    All,

    /// Tracks flagged as favorites
    Favorites,

    /// One artist's tracks
    Artist,

    /// One album's tracks
    Album,

    /// A user-created playlist
    Custom,
}

impl PlaylistKind {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Favorites => "favorites",
            Self::Artist => "artist",
            Self::Album => "album",
            Self::Custom => "custom",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "favorites" => Some(Self::Favorites),
            "artist" => Some(Self::Artist),
            "album" => Some(Self::Album),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlaylistKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User-created playlist
///
/// Owns an ordered, deduplicated sequence of track-id references. Positions
/// are plain integers and need not be gap-free; only relative order matters.
/// Deleting a playlist cascades deletion of its track references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Display name
    pub name: String,

    /// Optional cover image path
    pub cover_path: Option<String>,

    /// Creation timestamp (Unix epoch seconds)
    pub created_at: i64,

    /// Last update timestamp (Unix epoch seconds)
    pub updated_at: i64,

    /// Ordered track references, populated on demand
    pub tracks: Option<Vec<PlaylistTrackRef>>,
}

/// A track's membership in a playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistTrackRef {
    /// Referenced track
    pub track_id: TrackId,

    /// Ordering position within the playlist
    pub position: i64,

    /// When the track was added (Unix epoch seconds)
    pub added_at: i64,
}
