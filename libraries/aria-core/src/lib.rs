//! Aria Player Core
//!
//! Platform-agnostic core types, collaborator traits, and error handling for
//! Aria Player.
//!
//! This crate provides the foundational building blocks used by the library,
//! playback, and storage layers:
//!
//! - **Domain Types**: [`Track`], [`Playlist`], [`FolderRef`], [`MetadataOverride`], ...
//! - **Collaborator Traits**: [`ContentIndex`] (host media index), [`KeyValueStore`]
//!   (durable key-value persistence)
//! - **Error Handling**: unified [`AriaError`] and [`Result`] types
//!
//! The traits model external collaborators: the host OS content index and the
//! persistence store are provided by platforms (or by test fakes), never owned
//! by this workspace.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{AriaError, Result};
pub use traits::{ContentIndex, KeyValueStore};

pub use types::{
    FolderRef, MetadataOverride, Playlist, PlaylistId, PlaylistKind, PlaylistTrackRef,
    RawMediaRecord, Track, TrackId,
};
