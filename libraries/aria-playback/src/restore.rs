//! Restore coordination
//!
//! On launch, the persisted record is re-attached to a freshly assembled
//! playlist by seeking the engine without starting playback. The seek makes
//! the engine fire its own transition callback, which would normally persist
//! "track changed, position 0" and overwrite the very record being restored.
//! The session therefore runs in a tagged mode while restoration is in
//! flight, and only returns to normal after the engine has confirmed the
//! seek *and* a short settle delay has elapsed, because the transition
//! callback may arrive asynchronously after the seek call returns.

use aria_core::{Track, TrackId};

/// Session mode: suppression of callback-driven persistence is explicit
/// state, not an incidental flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Ordinary operation
    Normal,

    /// A restore seek has been issued; waiting for the engine to confirm it
    AwaitingRestoreTransition {
        /// Index the engine was told to seek to
        index: usize,
    },

    /// The engine confirmed the seek; waiting out the settle delay
    RestoreSettling,
}

impl SessionMode {
    /// Whether restore suppression is active
    pub fn is_restoring(&self) -> bool {
        !matches!(self, Self::Normal)
    }

    /// Feed an engine item transition through the mode machine
    ///
    /// Returns `true` when the transition confirms the restore seek and the
    /// settle timer should be started. Transitions to other indices while
    /// awaiting confirmation stay suppressed: they are artifacts of the
    /// programmatic seek, not user actions.
    pub fn on_item_transition(&mut self, index: usize) -> bool {
        match *self {
            Self::AwaitingRestoreTransition { index: target } if index == target => {
                *self = Self::RestoreSettling;
                true
            }
            _ => false,
        }
    }

    /// The settle delay elapsed; resume normal persistence
    pub fn settle_elapsed(&mut self) {
        *self = Self::Normal;
    }
}

/// Resolve a persisted track id against a freshly assembled track list
///
/// `None` when the id is absent (library changed, file removed): restoration
/// is then a no-op, not an error.
pub fn resolve_index(tracks: &[Track], last_track_id: &str) -> Option<usize> {
    let target = TrackId::new(last_track_id);
    tracks.iter().position(|track| track.id == target)
}
