/// User-entered metadata overrides
use serde::{Deserialize, Serialize};

/// Per-track metadata override, keyed externally by track ID
///
/// A `None` field means "no override for that field", never "clear it".
/// Overrides persist independently of scans and are re-applied every time a
/// track list is materialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataOverride {
    /// Override for the track title
    pub title: Option<String>,

    /// Override for the artist name
    pub artist: Option<String>,

    /// Override for the album name
    pub album: Option<String>,

    /// Override for the album art locator
    pub cover_path: Option<String>,
}

impl MetadataOverride {
    /// Check whether the override carries any field at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.album.is_none()
            && self.cover_path.is_none()
    }
}
