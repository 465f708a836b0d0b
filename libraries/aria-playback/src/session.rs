//! Playback session controller
//!
//! One task owns the authoritative playback state: what playlist is loaded,
//! which index is current, whether the engine is playing, and the persisted
//! record. Clients talk to it through a cloneable [`SessionHandle`]; the
//! engine talks to it through its event channel. Commands, engine events,
//! the position sampler, the persistence debounce window, and the restore
//! settle delay are all arms of a single `select!` loop, so no state is ever
//! touched from two execution contexts.

use crate::engine::{EngineEvent, MediaEngine};
use crate::error::{PlaybackError, Result};
use crate::events::SessionEvent;
use crate::persist::{PersistedPlaybackRecord, PersistenceGateway};
use crate::restore::{resolve_index, SessionMode};
use crate::tracker::PositionDebouncer;
use crate::types::{PlaybackPosition, PlaybackSelection, RepeatMode, SessionConfig, SessionSnapshot};
use aria_core::{KeyValueStore, PlaylistKind, Track};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::time::{Instant, MissedTickBehavior};

/// Commands accepted by the session task
#[derive(Debug)]
pub enum SessionCommand {
    /// Replace the loaded playlist wholesale
    SetPlaylist {
        /// The new selection
        selection: PlaybackSelection,
        /// Completion ack
        ack: oneshot::Sender<()>,
    },

    /// Load the track at `index` and start playing it
    Play {
        /// Index into the loaded playlist
        index: usize,
        /// Outcome: `RangeError` for an invalid index
        ack: oneshot::Sender<Result<()>>,
    },

    /// Pause playback and persist the position immediately
    Pause,

    /// Resume playback (no-op with nothing loaded)
    Resume,

    /// Seek within the current track
    SeekTo {
        /// Target position in milliseconds (clamped to `[0, duration]`)
        position_ms: i64,
        /// Completion ack
        ack: oneshot::Sender<()>,
    },

    /// Advance to the next track if the engine has one
    Next,

    /// Go back to the previous track if the engine has one
    Previous,

    /// Cycle repeat mode Off → All → One → Off
    ToggleRepeat,

    /// Flip the shuffle flag
    ToggleShuffle,

    /// Re-attach a persisted record to the loaded playlist
    Restore {
        /// The record read from storage
        record: PersistedPlaybackRecord,
        /// Completion ack
        ack: oneshot::Sender<()>,
    },

    /// Read a point-in-time view of the session
    Snapshot {
        /// Reply channel
        reply: oneshot::Sender<SessionSnapshot>,
    },

    /// Stop the session, flushing any pending persistence
    Stop {
        /// Acked after the flush completes
        ack: oneshot::Sender<()>,
    },
}

/// Client handle to a running playback session
///
/// Cheap to clone; all clones talk to the same session task. Constructed via
/// [`PlaybackSession::spawn`] and handed to consumers explicitly; there is
/// no process-wide player singleton.
#[derive(Clone)]
pub struct SessionHandle {
    cmd_tx: mpsc::UnboundedSender<SessionCommand>,
    position_rx: watch::Receiver<PlaybackPosition>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    /// Replace the loaded playlist
    pub async fn set_playlist(&self, selection: PlaybackSelection) -> Result<()> {
        let (ack, done) = oneshot::channel();
        self.send(SessionCommand::SetPlaylist { selection, ack })?;
        done.await.map_err(|_| PlaybackError::SessionClosed)
    }

    /// Play the track at `index`
    ///
    /// An out-of-range index is reported as a recoverable [`PlaybackError::RangeError`]
    /// and leaves the session untouched.
    pub async fn play(&self, index: usize) -> Result<()> {
        let (ack, done) = oneshot::channel();
        self.send(SessionCommand::Play { index, ack })?;
        done.await.map_err(|_| PlaybackError::SessionClosed)?
    }

    /// Pause playback
    pub fn pause(&self) -> Result<()> {
        self.send(SessionCommand::Pause)
    }

    /// Resume playback
    pub fn resume(&self) -> Result<()> {
        self.send(SessionCommand::Resume)
    }

    /// Seek within the current track
    pub async fn seek_to(&self, position_ms: i64) -> Result<()> {
        let (ack, done) = oneshot::channel();
        self.send(SessionCommand::SeekTo { position_ms, ack })?;
        done.await.map_err(|_| PlaybackError::SessionClosed)
    }

    /// Skip to the next track
    pub fn next(&self) -> Result<()> {
        self.send(SessionCommand::Next)
    }

    /// Go back to the previous track
    pub fn previous(&self) -> Result<()> {
        self.send(SessionCommand::Previous)
    }

    /// Cycle the repeat mode
    pub fn toggle_repeat_mode(&self) -> Result<()> {
        self.send(SessionCommand::ToggleRepeat)
    }

    /// Flip the shuffle flag
    pub fn toggle_shuffle_mode(&self) -> Result<()> {
        self.send(SessionCommand::ToggleShuffle)
    }

    /// Re-attach a persisted record to the loaded playlist
    pub async fn restore(&self, record: PersistedPlaybackRecord) -> Result<()> {
        let (ack, done) = oneshot::channel();
        self.send(SessionCommand::Restore { record, ack })?;
        done.await.map_err(|_| PlaybackError::SessionClosed)
    }

    /// Read a point-in-time view of the session
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (reply, done) = oneshot::channel();
        self.send(SessionCommand::Snapshot { reply })?;
        done.await.map_err(|_| PlaybackError::SessionClosed)
    }

    /// The current track, derived from the loaded playlist and index
    pub async fn current_track(&self) -> Result<Option<Track>> {
        Ok(self.snapshot().await?.current_track)
    }

    /// Stop the session, flushing pending persistence first
    pub async fn stop(&self) -> Result<()> {
        let (ack, done) = oneshot::channel();
        self.send(SessionCommand::Stop { ack })?;
        done.await.map_err(|_| PlaybackError::SessionClosed)
    }

    /// Watch the sampled playback position
    pub fn position(&self) -> watch::Receiver<PlaybackPosition> {
        self.position_rx.clone()
    }

    /// Subscribe to session events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    fn send(&self, cmd: SessionCommand) -> Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| PlaybackError::SessionClosed)
    }
}

/// The playlist currently loaded into the engine
struct LoadedPlaylist {
    name: String,
    kind: PlaylistKind,
    tracks: Vec<Track>,
}

/// The session task state
///
/// Owned by exactly one task; every mutation, command-driven or
/// callback-driven, goes through [`PlaybackSession::run`].
pub struct PlaybackSession {
    engine: Box<dyn MediaEngine>,
    gateway: PersistenceGateway,
    config: SessionConfig,

    selection: Option<LoadedPlaylist>,
    current_index: Option<usize>,

    // Runtime state mirrored from confirmed engine callbacks, never derived
    // independently.
    is_playing: bool,
    repeat_mode: RepeatMode,
    shuffle_enabled: bool,

    mode: SessionMode,
    debouncer: PositionDebouncer,

    position_tx: watch::Sender<PlaybackPosition>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl PlaybackSession {
    /// Spawn a session task over the given engine and store
    ///
    /// `engine_events` is the channel the engine implementation emits its
    /// callbacks on; it feeds the same task that processes commands.
    pub fn spawn(
        engine: Box<dyn MediaEngine>,
        engine_events: mpsc::UnboundedReceiver<EngineEvent>,
        store: Arc<dyn KeyValueStore>,
        config: SessionConfig,
    ) -> SessionHandle {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (position_tx, position_rx) = watch::channel(PlaybackPosition::default());
        let (event_tx, _) = broadcast::channel(config.event_capacity);

        let session = Self {
            engine,
            gateway: PersistenceGateway::new(store),
            debouncer: PositionDebouncer::new(config.persist_threshold_ms),
            config,
            selection: None,
            current_index: None,
            is_playing: false,
            repeat_mode: RepeatMode::Off,
            shuffle_enabled: false,
            mode: SessionMode::Normal,
            position_tx,
            event_tx: event_tx.clone(),
        };

        let handle = SessionHandle {
            cmd_tx,
            position_rx,
            event_tx,
        };

        tokio::spawn(session.run(cmd_rx, engine_events));

        handle
    }

    /// Load the persisted record for a store, for feeding [`SessionHandle::restore`]
    pub async fn load_persisted(store: &Arc<dyn KeyValueStore>) -> PersistedPlaybackRecord {
        PersistenceGateway::new(Arc::clone(store)).load().await
    }

    async fn run(
        mut self,
        mut cmd_rx: mpsc::UnboundedReceiver<SessionCommand>,
        mut engine_rx: mpsc::UnboundedReceiver<EngineEvent>,
    ) {
        let mut sampler = tokio::time::interval(self.config.sample_interval);
        sampler.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut debounce_deadline: Option<Instant> = None;
        let mut settle_deadline: Option<Instant> = None;
        let mut stop_ack: Option<oneshot::Sender<()>> = None;
        let mut engine_open = true;

        loop {
            tokio::select! {
                // Engine confirmations drain before the next command, so a
                // burst of toggles always cycles from confirmed state.
                biased;

                event = engine_rx.recv(), if engine_open => match event {
                    Some(event) => {
                        self.handle_engine_event(event, &mut debounce_deadline, &mut settle_deadline);
                    }
                    None => engine_open = false,
                },
                cmd = cmd_rx.recv() => match cmd {
                    Some(SessionCommand::Stop { ack }) => {
                        stop_ack = Some(ack);
                        break;
                    }
                    Some(cmd) => self.handle_command(cmd, &mut debounce_deadline),
                    // Every handle dropped: the session is over.
                    None => break,
                },
                () = sleep_until_opt(debounce_deadline), if debounce_deadline.is_some() => {
                    debounce_deadline = None;
                    if let Some(pending) = self.debouncer.take_pending() {
                        self.gateway.write_position(pending);
                        self.debouncer.note_persisted(pending);
                    }
                },
                () = sleep_until_opt(settle_deadline), if settle_deadline.is_some() => {
                    settle_deadline = None;
                    self.mode.settle_elapsed();
                },
                _ = sampler.tick() => {
                    self.sample_position(&mut debounce_deadline);
                },
            }
        }

        // Cancellation: flush a pending debounced write rather than dropping
        // it silently.
        if let Some(pending) = self.debouncer.take_pending() {
            self.gateway.flush_position(pending).await;
        }
        if let Some(ack) = stop_ack {
            let _ = ack.send(());
        }
        tracing::debug!("Playback session stopped");
    }

    fn handle_command(&mut self, cmd: SessionCommand, debounce_deadline: &mut Option<Instant>) {
        match cmd {
            SessionCommand::SetPlaylist { selection, ack } => {
                self.set_playlist(selection);
                let _ = ack.send(());
            }
            SessionCommand::Play { index, ack } => {
                let _ = ack.send(self.play(index, debounce_deadline));
            }
            SessionCommand::Pause => self.pause(debounce_deadline),
            SessionCommand::Resume => self.resume(),
            SessionCommand::SeekTo { position_ms, ack } => {
                self.seek_to(position_ms, debounce_deadline);
                let _ = ack.send(());
            }
            SessionCommand::Next => self.skip_next(),
            SessionCommand::Previous => self.skip_previous(),
            SessionCommand::ToggleRepeat => self.toggle_repeat(),
            SessionCommand::ToggleShuffle => self.toggle_shuffle(),
            SessionCommand::Restore { record, ack } => {
                self.restore(&record);
                let _ = ack.send(());
            }
            SessionCommand::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
            // Stop is intercepted by the run loop.
            SessionCommand::Stop { ack } => {
                let _ = ack.send(());
            }
        }
    }

    // ===== Commands =====

    fn set_playlist(&mut self, selection: PlaybackSelection) {
        let same_queue = self.selection.as_ref().is_some_and(|loaded| {
            loaded.tracks.len() == selection.tracks.len()
                && loaded
                    .tracks
                    .iter()
                    .zip(selection.tracks.iter())
                    .all(|(a, b)| a.id == b.id)
        });

        if same_queue {
            // Identical content: refresh metadata without touching the
            // engine, so an in-progress track keeps playing glitch-free.
            if let Some(loaded) = &mut self.selection {
                loaded.name = selection.playlist_name;
                loaded.kind = selection.kind;
                loaded.tracks = selection.tracks;
            }
        } else {
            self.engine.set_queue(&selection.tracks);
            self.is_playing = false;

            let len = selection.tracks.len();
            self.current_index = self.engine.current_index().filter(|&i| i < len);
            self.selection = Some(LoadedPlaylist {
                name: selection.playlist_name,
                kind: selection.kind,
                tracks: selection.tracks,
            });
        }

        if let Some(loaded) = &self.selection {
            self.emit(SessionEvent::PlaylistReplaced {
                name: loaded.name.clone(),
                kind: loaded.kind,
                track_count: loaded.tracks.len(),
            });
        }
    }

    fn play(&mut self, index: usize, debounce_deadline: &mut Option<Instant>) -> Result<()> {
        let len = self.selection.as_ref().map_or(0, |s| s.tracks.len());
        if index >= len {
            return Err(PlaybackError::RangeError { index, len });
        }

        self.engine.seek_to(index, Duration::ZERO);
        self.engine.play();
        self.current_index = Some(index);

        // Track id and position 0 are written in the same logical step, so a
        // restored reader never pairs the new id with the old position.
        if let Some(track) = self.current_track() {
            self.gateway.write_track_id(&track.id);
        }
        self.persist_immediate(0, debounce_deadline);

        Ok(())
    }

    fn pause(&mut self, debounce_deadline: &mut Option<Instant>) {
        if self.current_index.is_none() {
            return;
        }
        self.engine.pause();
        let position_ms = self.engine.position().as_millis() as i64;
        self.persist_immediate(position_ms, debounce_deadline);
    }

    fn resume(&mut self) {
        if self.current_index.is_none() {
            return;
        }
        self.engine.play();
    }

    fn seek_to(&mut self, position_ms: i64, debounce_deadline: &mut Option<Instant>) {
        if self.current_index.is_none() {
            return;
        }

        let duration_ms = self.engine.duration().as_millis() as i64;
        let clamped = if duration_ms > 0 {
            position_ms.clamp(0, duration_ms)
        } else {
            position_ms.max(0)
        };

        let was_playing = self.is_playing;
        self.engine.seek(Duration::from_millis(clamped as u64));
        if !was_playing {
            // Some engines resume on seek; a paused session must stay
            // paused afterwards.
            self.engine.pause();
        }

        self.publish_position(clamped);
        self.persist_immediate(clamped, debounce_deadline);
    }

    fn skip_next(&mut self) {
        if self.current_index.is_none() {
            return;
        }
        if self.engine.has_next() {
            self.engine.next();
            self.engine.play();
        }
    }

    fn skip_previous(&mut self) {
        if self.current_index.is_none() {
            return;
        }
        if self.engine.has_previous() {
            self.engine.previous();
            self.engine.play();
        }
    }

    fn toggle_repeat(&mut self) {
        if self.current_index.is_none() {
            return;
        }
        let next = self.repeat_mode.next();
        self.engine.set_repeat(next);
        // Repeat-one and shuffle are mutually exclusive: with a randomized
        // order, "repeat one track" is ambiguous.
        if next == RepeatMode::One && self.shuffle_enabled {
            self.engine.set_shuffle(false);
        }
    }

    fn toggle_shuffle(&mut self) {
        if self.current_index.is_none() {
            return;
        }
        self.engine.set_shuffle(!self.shuffle_enabled);
    }

    fn restore(&mut self, record: &PersistedPlaybackRecord) {
        let Some(track_id) = record.last_track_id.as_deref() else {
            return;
        };
        let Some(loaded) = &self.selection else {
            return;
        };
        let Some(index) = resolve_index(&loaded.tracks, track_id) else {
            tracing::debug!("Persisted track {track_id} no longer in library, nothing to restore");
            return;
        };

        let position_ms = record.last_position_ms.max(0);
        self.engine
            .seek_to(index, Duration::from_millis(position_ms as u64));
        self.current_index = Some(index);
        self.mode = SessionMode::AwaitingRestoreTransition { index };

        // The record already holds this position; without this the sampler
        // would immediately see it as a fresh candidate and write it back.
        self.debouncer.note_persisted(position_ms);
        self.publish_position(position_ms);
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            playlist_name: self.selection.as_ref().map(|s| s.name.clone()),
            kind: self.selection.as_ref().map(|s| s.kind),
            track_count: self.selection.as_ref().map_or(0, |s| s.tracks.len()),
            current_index: self.current_index,
            current_track: self.current_track().cloned(),
            is_playing: self.is_playing,
            repeat_mode: self.repeat_mode,
            shuffle_enabled: self.shuffle_enabled,
            position: *self.position_tx.borrow(),
            restoring: self.mode.is_restoring(),
        }
    }

    // ===== Engine callbacks =====

    fn handle_engine_event(
        &mut self,
        event: EngineEvent,
        debounce_deadline: &mut Option<Instant>,
        settle_deadline: &mut Option<Instant>,
    ) {
        match event {
            EngineEvent::PlayingChanged(is_playing) => {
                self.is_playing = is_playing;
                self.emit(SessionEvent::PlayingChanged { is_playing });
            }
            EngineEvent::ItemTransition(index) => {
                self.handle_item_transition(index, debounce_deadline, settle_deadline);
            }
            EngineEvent::TimelineChanged => {
                let position_ms = self.engine.position().as_millis() as i64;
                self.publish_position(position_ms);
            }
            EngineEvent::RepeatModeChanged(mode) => {
                self.repeat_mode = mode;
                self.emit(SessionEvent::RepeatModeChanged { mode });
            }
            EngineEvent::ShuffleChanged(enabled) => {
                self.shuffle_enabled = enabled;
                self.emit(SessionEvent::ShuffleChanged { enabled });
            }
        }
    }

    fn handle_item_transition(
        &mut self,
        index: usize,
        debounce_deadline: &mut Option<Instant>,
        settle_deadline: &mut Option<Instant>,
    ) {
        if self.mode.on_item_transition(index) {
            // Restore seek confirmed: start the settle delay, persistence
            // stays suppressed until it elapses.
            *settle_deadline = Some(Instant::now() + self.config.restore_settle);
            return;
        }
        if self.mode.is_restoring() {
            return;
        }

        let changed = self.current_index != Some(index);
        self.current_index = Some(index);

        let Some(track) = self.current_track().cloned() else {
            return;
        };

        if changed {
            // Confirmed track change: the only trigger for the track-id
            // write, paired with an immediate position write.
            self.gateway.write_track_id(&track.id);
            let position_ms = self.engine.position().as_millis() as i64;
            self.persist_immediate(position_ms, debounce_deadline);
        }

        self.emit(SessionEvent::TrackChanged {
            index,
            track_id: track.id.to_string(),
        });
    }

    // ===== Sampling & persistence =====

    fn sample_position(&mut self, debounce_deadline: &mut Option<Instant>) {
        if self.current_index.is_none() {
            return;
        }

        let position_ms = self.engine.position().as_millis() as i64;
        self.publish_position(position_ms);

        if self.mode.is_restoring() {
            return;
        }
        if self.debouncer.offer(position_ms) {
            *debounce_deadline = Some(Instant::now() + self.config.persist_debounce);
        }
    }

    fn persist_immediate(&mut self, position_ms: i64, debounce_deadline: &mut Option<Instant>) {
        self.gateway.write_position(position_ms);
        self.debouncer.note_persisted(position_ms);
        *debounce_deadline = None;
    }

    fn publish_position(&self, position_ms: i64) {
        let position = PlaybackPosition {
            position_ms,
            duration_ms: self.engine.duration().as_millis() as i64,
        };
        self.position_tx.send_replace(position);
        self.emit(SessionEvent::PositionUpdate(position));
    }

    fn current_track(&self) -> Option<&Track> {
        let index = self.current_index?;
        self.selection.as_ref()?.tracks.get(index)
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.event_tx.send(event);
    }
}

/// Sleep until an optional deadline; callers guard the select arm with
/// `is_some()`, the fallback only keeps the future constructible.
async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
