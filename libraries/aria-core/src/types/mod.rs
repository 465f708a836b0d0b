//! Domain types for Aria Player

mod folder;
mod overlay;
mod playlist;
mod track;

pub use folder::FolderRef;
pub use overlay::MetadataOverride;
pub use playlist::{Playlist, PlaylistId, PlaylistKind, PlaylistTrackRef};
pub use track::{RawMediaRecord, Track, TrackId};
