//! Library scanner
//!
//! Queries the host content index and filters records down to the user's
//! scope folders. The index can only be filtered coarsely ("is music"), so
//! folder scoping happens here, against whichever path field the host-API era
//! provides.

use aria_core::{ContentIndex, FolderRef, RawMediaRecord, Track, TrackId};
use std::path::Path;
use std::sync::Arc;

/// Folder used when the user has not scoped the library to anything
const DEFAULT_FOLDER: &str = "primary:Music";

/// Scanner over the host content index
///
/// Pure query component: scanning has no side effects, and a failed or empty
/// host query yields an empty track list rather than an error.
pub struct LibraryScanner {
    index: Arc<dyn ContentIndex>,
}

impl LibraryScanner {
    /// Create a scanner over the given content index
    pub fn new(index: Arc<dyn ContentIndex>) -> Self {
        Self { index }
    }

    /// Scan the index, returning tracks inside the given scope folders
    ///
    /// An empty `folders` slice means the implementation-default folder
    /// (`primary:Music`). Result order is host-index order; the scanner never
    /// re-sorts.
    pub async fn scan(&self, folders: &[FolderRef]) -> Vec<Track> {
        let records = match self.index.query_music().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Content index query failed, treating library as empty: {e}");
                return Vec::new();
            }
        };

        let filter = ScopeFilter::new(folders);

        records
            .into_iter()
            .filter(|record| filter.matches(record))
            .map(track_from_record)
            .collect()
    }
}

/// Canonicalized folder scope
///
/// Each folder reference `volume:subpath` canonicalizes to the lowercase
/// prefix `subpath/`. A record is in scope iff its own relative storage path
/// starts with at least one prefix; legacy records that only carry an
/// absolute path match when the path contains `/subpath/` as a segment run.
/// Records without any usable path field are excluded, never included.
struct ScopeFilter {
    prefixes: Vec<String>,
}

impl ScopeFilter {
    fn new(folders: &[FolderRef]) -> Self {
        let default_folder = FolderRef::new(DEFAULT_FOLDER);
        let folders: &[FolderRef] = if folders.is_empty() {
            std::slice::from_ref(&default_folder)
        } else {
            folders
        };

        let prefixes = folders
            .iter()
            .map(|folder| {
                let sub = folder.subpath().trim_matches('/').to_lowercase();
                if sub.is_empty() {
                    sub
                } else {
                    format!("{sub}/")
                }
            })
            .collect();

        Self { prefixes }
    }

    fn matches(&self, record: &RawMediaRecord) -> bool {
        if let Some(relative) = &record.relative_path {
            let relative = relative.trim_start_matches('/').to_lowercase();
            return self
                .prefixes
                .iter()
                .any(|prefix| relative.starts_with(prefix.as_str()));
        }

        if let Some(absolute) = &record.legacy_path {
            let absolute = absolute.to_lowercase();
            return self.prefixes.iter().any(|prefix| {
                // Empty prefix (volume root scope) matches any absolute path.
                prefix.is_empty() || absolute.contains(&format!("/{prefix}"))
            });
        }

        // Neither path era available: not in scope.
        false
    }
}

/// Convert a raw index record into a library track
///
/// Title falls back to the file stem when the index has none; the favorite
/// flag and overrides are applied later by the overlay stage.
fn track_from_record(record: RawMediaRecord) -> Track {
    let title = record
        .title
        .filter(|t| !t.is_empty())
        .or_else(|| file_stem(record.legacy_path.as_deref()))
        .or_else(|| file_stem(Some(&record.locator)))
        .unwrap_or_else(|| record.id.clone());

    Track {
        id: TrackId::new(record.id),
        locator: record.locator,
        title,
        artist: record.artist.filter(|a| !a.is_empty()),
        album: None,
        album_art_locator: None,
        is_favorite: false,
    }
}

fn file_stem(path: Option<&str>) -> Option<String> {
    path.and_then(|p| Path::new(p).file_stem())
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modern_record(id: &str, relative_path: &str) -> RawMediaRecord {
        RawMediaRecord {
            id: id.to_string(),
            title: Some(format!("Track {id}")),
            artist: Some("Artist".to_string()),
            locator: format!("content://media/audio/{id}"),
            relative_path: Some(relative_path.to_string()),
            legacy_path: None,
        }
    }

    fn legacy_record(id: &str, absolute_path: &str) -> RawMediaRecord {
        RawMediaRecord {
            id: id.to_string(),
            title: Some(format!("Track {id}")),
            artist: Some("Artist".to_string()),
            locator: format!("file://{absolute_path}"),
            relative_path: None,
            legacy_path: Some(absolute_path.to_string()),
        }
    }

    #[test]
    fn modern_record_matches_prefix_case_insensitively() {
        let filter = ScopeFilter::new(&[FolderRef::new("primary:Music")]);

        assert!(filter.matches(&modern_record("1", "Music/Albums/")));
        assert!(filter.matches(&modern_record("2", "music/")));
        assert!(!filter.matches(&modern_record("3", "Podcasts/")));
        // Prefix match is on path segments, not plain string prefix.
        assert!(!filter.matches(&modern_record("4", "Musicals/")));
    }

    #[test]
    fn legacy_record_matches_segment_run() {
        let filter = ScopeFilter::new(&[FolderRef::new("primary:Music/Albums")]);

        assert!(filter.matches(&legacy_record(
            "1",
            "/storage/emulated/0/Music/Albums/track.mp3"
        )));
        assert!(!filter.matches(&legacy_record(
            "2",
            "/storage/emulated/0/Music/Loose/track.mp3"
        )));
    }

    #[test]
    fn record_without_path_fields_is_excluded() {
        let filter = ScopeFilter::new(&[]);
        let record = RawMediaRecord {
            id: "1".to_string(),
            title: None,
            artist: None,
            locator: "content://media/audio/1".to_string(),
            relative_path: None,
            legacy_path: None,
        };

        assert!(!filter.matches(&record));
    }

    #[test]
    fn empty_scope_uses_default_folder() {
        let filter = ScopeFilter::new(&[]);

        assert!(filter.matches(&modern_record("1", "Music/")));
        assert!(!filter.matches(&modern_record("2", "Download/")));
    }

    #[test]
    fn volume_root_scope_matches_everything_on_that_era() {
        let filter = ScopeFilter::new(&[FolderRef::new("primary:")]);

        assert!(filter.matches(&modern_record("1", "Anything/At/All/")));
        assert!(filter.matches(&legacy_record("2", "/storage/emulated/0/x.mp3")));
    }

    #[test]
    fn title_falls_back_to_file_stem() {
        let record = RawMediaRecord {
            id: "9".to_string(),
            title: None,
            artist: None,
            locator: "content://media/audio/9".to_string(),
            relative_path: Some("Music/".to_string()),
            legacy_path: Some("/storage/emulated/0/Music/No Tags.mp3".to_string()),
        };

        let track = track_from_record(record);
        assert_eq!(track.title, "No Tags");
    }
}
