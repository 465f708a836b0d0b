//! Metadata overlay
//!
//! Merges user-entered metadata overrides and favorite membership onto
//! scanned tracks. This is a pure, total function: an overlay lookup miss is
//! simply "no override", and applying the overlay twice with the same inputs
//! yields the same output.

use aria_core::{MetadataOverride, Track, TrackId};
use std::collections::{HashMap, HashSet};

/// Apply metadata overrides and favorite flags to a track list
///
/// Override fields take precedence field-by-field over scanned values; a
/// `None` override field preserves the scanned value rather than clearing it.
/// A track is a favorite iff its id is in `favorite_ids`.
pub fn apply(
    tracks: Vec<Track>,
    overrides: &HashMap<TrackId, MetadataOverride>,
    favorite_ids: &HashSet<TrackId>,
) -> Vec<Track> {
    tracks
        .into_iter()
        .map(|mut track| {
            if let Some(ov) = overrides.get(&track.id) {
                if let Some(title) = &ov.title {
                    track.title = title.clone();
                }
                if let Some(artist) = &ov.artist {
                    track.artist = Some(artist.clone());
                }
                if let Some(album) = &ov.album {
                    track.album = Some(album.clone());
                }
                if let Some(cover) = &ov.cover_path {
                    track.album_art_locator = Some(cover.clone());
                }
            }
            track.is_favorite = favorite_ids.contains(&track.id);
            track
        })
        .collect()
}
