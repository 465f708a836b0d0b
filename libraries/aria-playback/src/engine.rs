//! Media engine collaborator
//!
//! The external decode/output engine is modeled as a command surface plus an
//! event channel. Commands are issued by the session task; callbacks arrive
//! asynchronously as [`EngineEvent`]s on an mpsc channel feeding the same
//! task, so callback-driven and command-driven mutation share one
//! serialization point.

use crate::types::RepeatMode;
use aria_core::Track;
use std::time::Duration;
use tokio::sync::mpsc;

/// Commands and queries the playback engine exposes
///
/// Implementations are expected to mutate themselves asynchronously: a
/// command may return before the engine's own state reflects it, with the
/// confirmation arriving later as an [`EngineEvent`]. The session therefore
/// mirrors runtime state from events, never from assumptions about commands.
pub trait MediaEngine: Send {
    /// Replace the engine's queue to exactly match `tracks`, in order
    fn set_queue(&mut self, tracks: &[Track]);

    /// Seek to a queue item and an offset within it, without changing the
    /// play/pause state
    fn seek_to(&mut self, index: usize, position: Duration);

    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Seek within the current item
    fn seek(&mut self, position: Duration);

    /// Whether a next queue item exists
    fn has_next(&self) -> bool;

    /// Advance to the next queue item
    fn next(&mut self);

    /// Whether a previous queue item exists
    fn has_previous(&self) -> bool;

    /// Go back to the previous queue item
    fn previous(&mut self);

    /// Set the repeat mode
    fn set_repeat(&mut self, mode: RepeatMode);

    /// Enable or disable shuffle
    fn set_shuffle(&mut self, enabled: bool);

    /// Current position within the current item
    fn position(&self) -> Duration;

    /// Duration of the current item (zero when unknown)
    fn duration(&self) -> Duration;

    /// Index of the current queue item, if any
    fn current_index(&self) -> Option<usize>;
}

/// Callbacks from the engine, delivered over a channel into the session task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The engine started or stopped playing
    PlayingChanged(bool),

    /// The engine moved to another queue item (auto-advance, next/previous,
    /// or a programmatic seek)
    ItemTransition(usize),

    /// Duration or internal engine state changed; queries should be re-read
    TimelineChanged,

    /// The engine confirmed a repeat mode change
    RepeatModeChanged(RepeatMode),

    /// The engine confirmed a shuffle flag change
    ShuffleChanged(bool),
}

/// Create the channel pair engine implementations emit events on
pub fn engine_channel() -> (
    mpsc::UnboundedSender<EngineEvent>,
    mpsc::UnboundedReceiver<EngineEvent>,
) {
    mpsc::unbounded_channel()
}
