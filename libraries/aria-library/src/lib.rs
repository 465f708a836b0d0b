//! Aria Player - Library Views
//!
//! Turns the host's raw media index into the consistent, derived track lists
//! the playback session consumes:
//!
//! 1. [`LibraryScanner`] queries the host content index and applies
//!    folder-scope filtering.
//! 2. [`overlay::apply`] merges user-entered metadata overrides and favorite
//!    flags onto the scanned tracks.
//! 3. [`assembler::assemble`] derives named listings (all tracks, favorites,
//!    one artist/album, a custom playlist) with search filtering and stable
//!    sorting.
//!
//! Every stage is deterministic: the scanner preserves host-index order, the
//! overlay is a pure idempotent function, and the assembler uses stable sorts
//! so equal keys keep their prior relative order.

pub mod assembler;
pub mod overlay;
pub mod scanner;

pub use assembler::{assemble, group_keys, GroupBy, Listing, SortMode, UNKNOWN_GROUP};
pub use overlay::apply;
pub use scanner::LibraryScanner;
