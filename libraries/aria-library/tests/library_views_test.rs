//! End-to-end tests for the library pipeline
//!
//! Exercises scan → overlay → assemble against a fake content index, the way
//! a client rebuilds its listings after a rescan.

use aria_core::{
    AriaError, ContentIndex, FolderRef, MetadataOverride, RawMediaRecord, Result, TrackId,
};
use aria_library::{assemble, apply, Listing, LibraryScanner, SortMode};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Fake host index returning a canned record list
struct FakeIndex {
    records: Vec<RawMediaRecord>,
    fail: bool,
}

#[async_trait]
impl ContentIndex for FakeIndex {
    async fn query_music(&self) -> Result<Vec<RawMediaRecord>> {
        if self.fail {
            return Err(AriaError::index("host query failed"));
        }
        Ok(self.records.clone())
    }
}

fn record(id: &str, title: &str, artist: &str, relative_path: &str) -> RawMediaRecord {
    RawMediaRecord {
        id: id.to_string(),
        title: Some(title.to_string()),
        artist: Some(artist.to_string()),
        locator: format!("content://media/audio/{id}"),
        relative_path: Some(relative_path.to_string()),
        legacy_path: None,
    }
}

#[tokio::test]
async fn scan_overlay_assemble_pipeline() {
    let index = FakeIndex {
        records: vec![
            record("1", "Northern Lights", "Aurora", "Music/"),
            record("2", "Southbound", "Meridian", "Music/Albums/"),
            record("3", "Not In Scope", "Aurora", "Podcasts/"),
        ],
        fail: false,
    };
    let scanner = LibraryScanner::new(Arc::new(index));

    // Scope defaults to the Music folder.
    let scanned = scanner.scan(&[]).await;
    assert_eq!(scanned.len(), 2);

    // User renamed track 2 and starred track 1.
    let mut overrides = HashMap::new();
    overrides.insert(
        TrackId::new("2"),
        MetadataOverride {
            title: Some("Southbound (Remaster)".to_string()),
            ..MetadataOverride::default()
        },
    );
    let favorites: HashSet<TrackId> = [TrackId::new("1")].into_iter().collect();

    let overlaid = apply(scanned, &overrides, &favorites);

    let all = assemble(&overlaid, Listing::All, "", SortMode::TitleAsc);
    let titles: Vec<&str> = all.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["Northern Lights", "Southbound (Remaster)"]);

    let favorites_view = assemble(&overlaid, Listing::Favorites, "", SortMode::Default);
    assert_eq!(favorites_view.len(), 1);
    assert_eq!(favorites_view[0].id.as_str(), "1");
}

#[tokio::test]
async fn failed_host_query_yields_empty_library() {
    let index = FakeIndex {
        records: Vec::new(),
        fail: true,
    };
    let scanner = LibraryScanner::new(Arc::new(index));

    let scanned = scanner.scan(&[FolderRef::new("primary:Music")]).await;
    assert!(scanned.is_empty());
}

#[tokio::test]
async fn scan_preserves_host_index_order() {
    let index = FakeIndex {
        records: vec![
            record("newest", "C", "x", "Music/"),
            record("older", "A", "x", "Music/"),
            record("oldest", "B", "x", "Music/"),
        ],
        fail: false,
    };
    let scanner = LibraryScanner::new(Arc::new(index));

    let scanned = scanner.scan(&[]).await;
    let ids: Vec<&str> = scanned.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["newest", "older", "oldest"]);
}
