//! Playlist assembler
//!
//! Derives the named listings the playback session consumes from an overlaid
//! track set: the whole library, favorites, one artist's or album's tracks,
//! or a user playlist resolved by stored order. Assembly is deterministic;
//! sorts are stable, so equal keys keep their prior relative order.

use aria_core::{PlaylistKind, Track, TrackId};

/// Bucket key for tracks missing the grouped-on field
///
/// Tracks without an artist/album still need a queryable partition.
pub const UNKNOWN_GROUP: &str = "Unknown";

/// Sort applied to an assembled listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Preserve incoming order (host-index order, or stored playlist order)
    #[default]
    Default,

    /// Alphabetical ascending on title, case-insensitive
    TitleAsc,

    /// Alphabetical descending on title, case-insensitive
    TitleDesc,
}

/// Field tracks are grouped by for browsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    /// Partition by artist
    Artist,

    /// Partition by album
    Album,
}

/// A listing selection to assemble
#[derive(Debug, Clone, Copy)]
pub enum Listing<'a> {
    /// Every track
    All,

    /// Tracks flagged as favorites
    Favorites,

    /// One artist partition, selected by group key
    Artist(&'a str),

    /// One album partition, selected by group key
    Album(&'a str),

    /// A user playlist's ordered track ids
    Custom(&'a [TrackId]),
}

impl Listing<'_> {
    /// The playlist kind this listing materializes
    pub fn kind(&self) -> PlaylistKind {
        match self {
            Self::All => PlaylistKind::All,
            Self::Favorites => PlaylistKind::Favorites,
            Self::Artist(_) => PlaylistKind::Artist,
            Self::Album(_) => PlaylistKind::Album,
            Self::Custom(_) => PlaylistKind::Custom,
        }
    }
}

/// Assemble an ordered track listing
///
/// The search filter (case-insensitive substring on title or artist, empty
/// query = no filtering) runs before selection and sort. Grouped listings
/// keep their incoming track order: sorting grouped views reorders group
/// keys (see [`group_keys`]), not the tracks inside a partition. Custom
/// playlists resolve stored id order against the current track set; ids with
/// no matching track are dropped silently.
pub fn assemble(tracks: &[Track], listing: Listing<'_>, query: &str, sort: SortMode) -> Vec<Track> {
    let matching: Vec<&Track> = tracks
        .iter()
        .filter(|track| matches_query(track, query))
        .collect();

    let mut selected: Vec<Track> = match listing {
        Listing::All => matching.into_iter().cloned().collect(),
        Listing::Favorites => matching
            .into_iter()
            .filter(|t| t.is_favorite)
            .cloned()
            .collect(),
        Listing::Artist(key) => matching
            .into_iter()
            .filter(|t| group_key(t.artist.as_deref()) == key)
            .cloned()
            .collect(),
        Listing::Album(key) => matching
            .into_iter()
            .filter(|t| group_key(t.album.as_deref()) == key)
            .cloned()
            .collect(),
        Listing::Custom(ids) => {
            let mut resolved = Vec::with_capacity(ids.len());
            for id in ids {
                if let Some(track) = matching.iter().find(|t| &t.id == id) {
                    resolved.push((*track).clone());
                }
            }
            resolved
        }
    };

    // Grouped views sort group keys, not the tracks inside a partition.
    if !matches!(listing, Listing::Artist(_) | Listing::Album(_)) {
        sort_tracks(&mut selected, sort);
    }

    selected
}

/// Enumerate the group keys of a grouped view
///
/// Keys appear in first-seen track order for [`SortMode::Default`], otherwise
/// sorted alphabetically (case-insensitive). Tracks missing the grouped-on
/// field land under [`UNKNOWN_GROUP`], which is itself a queryable key.
pub fn group_keys(tracks: &[Track], by: GroupBy, sort: SortMode) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();

    for track in tracks {
        let field = match by {
            GroupBy::Artist => track.artist.as_deref(),
            GroupBy::Album => track.album.as_deref(),
        };
        let key = group_key(field);
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }

    match sort {
        SortMode::Default => {}
        SortMode::TitleAsc => keys.sort_by_key(|k| k.to_lowercase()),
        SortMode::TitleDesc => {
            keys.sort_by(|a, b| b.to_lowercase().cmp(&a.to_lowercase()));
        }
    }

    keys
}

fn group_key(field: Option<&str>) -> &str {
    match field {
        Some(value) if !value.is_empty() => value,
        _ => UNKNOWN_GROUP,
    }
}

fn matches_query(track: &Track, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    track.title.to_lowercase().contains(&query)
        || track
            .artist
            .as_deref()
            .is_some_and(|artist| artist.to_lowercase().contains(&query))
}

fn sort_tracks(tracks: &mut [Track], sort: SortMode) {
    match sort {
        SortMode::Default => {}
        // Vec::sort_by is stable: equal titles keep their prior order.
        SortMode::TitleAsc => tracks.sort_by_key(|t| t.title.to_lowercase()),
        SortMode::TitleDesc => {
            tracks.sort_by(|a, b| b.title.to_lowercase().cmp(&a.title.to_lowercase()));
        }
    }
}
