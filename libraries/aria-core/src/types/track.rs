/// Track domain types
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable track identifier assigned by the host content index
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a track ID from its string form
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Audio track
///
/// Identity is `id`; every other field is mutable via the metadata overlay.
/// The authoritative track list is replaced wholesale on every rescan, so a
/// `Track` held across scans is only ever a value copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Opaque locator (URI or path) the playback engine can open
    pub locator: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: Option<String>,

    /// Album name
    pub album: Option<String>,

    /// Locator for album art, if any
    pub album_art_locator: Option<String>,

    /// Whether the user marked this track as a favorite
    pub is_favorite: bool,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(id: impl Into<TrackId>, locator: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            locator: locator.into(),
            title: title.into(),
            artist: None,
            album: None,
            album_art_locator: None,
            is_favorite: false,
        }
    }
}

/// Raw media record as returned by the host content index
///
/// Two host-API eras exist: newer indexes expose a structured relative
/// storage path, older ones only an absolute file path. A record may carry
/// either, or neither; records without any usable path are never in scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMediaRecord {
    /// Stable identifier assigned by the index
    pub id: String,

    /// Title as known to the index
    pub title: Option<String>,

    /// Artist as known to the index
    pub artist: Option<String>,

    /// Locator (URI or path) the playback engine can open
    pub locator: String,

    /// Relative storage path (modern host APIs), e.g. `Music/Albums/`
    pub relative_path: Option<String>,

    /// Absolute file path (legacy host APIs)
    pub legacy_path: Option<String>,
}
