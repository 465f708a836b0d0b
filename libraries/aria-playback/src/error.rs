//! Error types for the playback session

use thiserror::Error;

/// Playback session errors
///
/// Nothing here is fatal: a range error leaves the session untouched, and a
/// closed session only means every handle call from then on is a no-op error.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Index outside the loaded playlist
    #[error("Index out of range: {index} (playlist has {len} tracks)")]
    RangeError {
        /// Requested index
        index: usize,
        /// Loaded track count
        len: usize,
    },

    /// The session task has shut down
    #[error("Playback session closed")]
    SessionClosed,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
