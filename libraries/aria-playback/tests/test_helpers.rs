//! Test helpers and fixtures for playback session tests
//!
//! Provides a scripted fake media engine (with a virtual-clock position so
//! paused-time tests stay deterministic) and an in-memory key-value store
//! that counts writes per key.

use aria_core::{AriaError, KeyValueStore, Track};
use aria_playback::{EngineEvent, MediaEngine, RepeatMode};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

// ===== Fake media engine =====

#[derive(Debug)]
struct FakeEngineState {
    queue: Vec<Track>,
    current_index: Option<usize>,
    playing: bool,
    repeat: RepeatMode,
    shuffle: bool,
    base_position: Duration,
    playing_since: Option<Instant>,
    duration: Duration,
    frozen: bool,
    auto_resume_on_seek: bool,
    set_queue_calls: usize,
    seeks: Vec<(usize, u64)>,
}

impl FakeEngineState {
    fn effective_position(&self) -> Duration {
        if self.playing && !self.frozen {
            if let Some(since) = self.playing_since {
                return self.base_position + since.elapsed();
            }
        }
        self.base_position
    }
}

/// Fake engine given to the session under test
pub struct FakeEngine {
    state: Arc<Mutex<FakeEngineState>>,
    events: mpsc::UnboundedSender<EngineEvent>,
}

/// Test-side control and inspection handle for the fake engine
#[derive(Clone)]
pub struct FakeEngineHandle {
    state: Arc<Mutex<FakeEngineState>>,
    events: mpsc::UnboundedSender<EngineEvent>,
}

/// Create a fake engine plus its control handle
///
/// `events` is the sender half of the channel handed to
/// `PlaybackSession::spawn`.
pub fn fake_engine(events: mpsc::UnboundedSender<EngineEvent>) -> (FakeEngine, FakeEngineHandle) {
    let state = Arc::new(Mutex::new(FakeEngineState {
        queue: Vec::new(),
        current_index: None,
        playing: false,
        repeat: RepeatMode::Off,
        shuffle: false,
        base_position: Duration::ZERO,
        playing_since: None,
        duration: Duration::from_secs(300),
        frozen: false,
        auto_resume_on_seek: false,
        set_queue_calls: 0,
        seeks: Vec::new(),
    }));

    let engine = FakeEngine {
        state: Arc::clone(&state),
        events: events.clone(),
    };
    let handle = FakeEngineHandle { state, events };

    (engine, handle)
}

impl FakeEngine {
    fn emit(&self, event: EngineEvent) {
        let _ = self.events.send(event);
    }
}

impl MediaEngine for FakeEngine {
    fn set_queue(&mut self, tracks: &[Track]) {
        let was_playing = {
            let mut state = self.state.lock().unwrap();
            let was_playing = state.playing;
            state.queue = tracks.to_vec();
            state.set_queue_calls += 1;
            state.playing = false;
            state.playing_since = None;
            state.base_position = Duration::ZERO;
            // A fresh queue has no prepared item until a seek establishes one.
            state.current_index = None;
            was_playing
        };
        if was_playing {
            self.emit(EngineEvent::PlayingChanged(false));
        }
    }

    fn seek_to(&mut self, index: usize, position: Duration) {
        {
            let mut state = self.state.lock().unwrap();
            state.current_index = Some(index);
            state.base_position = position;
            state.seeks.push((index, position.as_millis() as u64));
            if state.playing {
                state.playing_since = Some(Instant::now());
            }
        }
        // The transition callback arrives asynchronously, like a real engine.
        self.emit(EngineEvent::ItemTransition(index));
    }

    fn play(&mut self) {
        let started = {
            let mut state = self.state.lock().unwrap();
            if state.playing {
                false
            } else {
                state.playing = true;
                state.playing_since = Some(Instant::now());
                true
            }
        };
        if started {
            self.emit(EngineEvent::PlayingChanged(true));
        }
    }

    fn pause(&mut self) {
        let stopped = {
            let mut state = self.state.lock().unwrap();
            if state.playing {
                state.base_position = state.effective_position();
                state.playing = false;
                state.playing_since = None;
                true
            } else {
                false
            }
        };
        if stopped {
            self.emit(EngineEvent::PlayingChanged(false));
        }
    }

    fn seek(&mut self, position: Duration) {
        let resumed = {
            let mut state = self.state.lock().unwrap();
            state.base_position = position;
            if state.playing {
                state.playing_since = Some(Instant::now());
                false
            } else if state.auto_resume_on_seek {
                // Models engines that resume as a side effect of seeking.
                state.playing = true;
                state.playing_since = Some(Instant::now());
                true
            } else {
                false
            }
        };
        if resumed {
            self.emit(EngineEvent::PlayingChanged(true));
        }
    }

    fn has_next(&self) -> bool {
        let state = self.state.lock().unwrap();
        match state.current_index {
            Some(index) => index + 1 < state.queue.len(),
            None => false,
        }
    }

    fn next(&mut self) {
        let index = {
            let mut state = self.state.lock().unwrap();
            let Some(index) = state.current_index else {
                return;
            };
            if index + 1 >= state.queue.len() {
                return;
            }
            state.current_index = Some(index + 1);
            state.base_position = Duration::ZERO;
            if state.playing {
                state.playing_since = Some(Instant::now());
            }
            index + 1
        };
        self.emit(EngineEvent::ItemTransition(index));
    }

    fn has_previous(&self) -> bool {
        let state = self.state.lock().unwrap();
        matches!(state.current_index, Some(index) if index > 0)
    }

    fn previous(&mut self) {
        let index = {
            let mut state = self.state.lock().unwrap();
            let Some(index) = state.current_index else {
                return;
            };
            if index == 0 {
                return;
            }
            state.current_index = Some(index - 1);
            state.base_position = Duration::ZERO;
            if state.playing {
                state.playing_since = Some(Instant::now());
            }
            index - 1
        };
        self.emit(EngineEvent::ItemTransition(index));
    }

    fn set_repeat(&mut self, mode: RepeatMode) {
        self.state.lock().unwrap().repeat = mode;
        self.emit(EngineEvent::RepeatModeChanged(mode));
    }

    fn set_shuffle(&mut self, enabled: bool) {
        self.state.lock().unwrap().shuffle = enabled;
        self.emit(EngineEvent::ShuffleChanged(enabled));
    }

    fn position(&self) -> Duration {
        self.state.lock().unwrap().effective_position()
    }

    fn duration(&self) -> Duration {
        self.state.lock().unwrap().duration
    }

    fn current_index(&self) -> Option<usize> {
        self.state.lock().unwrap().current_index
    }
}

impl FakeEngineHandle {
    pub fn playing(&self) -> bool {
        self.state.lock().unwrap().playing
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.lock().unwrap().current_index
    }

    pub fn position_ms(&self) -> u64 {
        self.state.lock().unwrap().effective_position().as_millis() as u64
    }

    pub fn set_queue_calls(&self) -> usize {
        self.state.lock().unwrap().set_queue_calls
    }

    pub fn seeks(&self) -> Vec<(usize, u64)> {
        self.state.lock().unwrap().seeks.clone()
    }

    pub fn shuffle(&self) -> bool {
        self.state.lock().unwrap().shuffle
    }

    pub fn repeat(&self) -> RepeatMode {
        self.state.lock().unwrap().repeat
    }

    /// Stall the position at its current value (playback keeps "running")
    pub fn freeze_position(&self) {
        let mut state = self.state.lock().unwrap();
        state.base_position = state.effective_position();
        if state.playing {
            state.playing_since = Some(Instant::now());
        }
        state.frozen = true;
    }

    /// Make subsequent seeks resume playback as a side effect
    pub fn set_auto_resume_on_seek(&self, enabled: bool) {
        self.state.lock().unwrap().auto_resume_on_seek = enabled;
    }

    /// Simulate the engine auto-advancing to `index` (end of track reached)
    pub fn emit_auto_advance(&self, index: usize) {
        {
            let mut state = self.state.lock().unwrap();
            state.current_index = Some(index);
            state.base_position = Duration::ZERO;
            if state.playing {
                state.playing_since = Some(Instant::now());
            }
        }
        let _ = self.events.send(EngineEvent::ItemTransition(index));
    }
}

// ===== In-memory key-value store =====

/// In-memory `KeyValueStore` with per-key write counts
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    writes: Mutex<HashMap<String, usize>>,
    fail_writes: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    pub fn write_count(&self, key: &str) -> usize {
        self.writes.lock().unwrap().get(key).copied().unwrap_or(0)
    }

    /// Make every subsequent write fail, simulating unavailable persistence
    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    fn record_write(&self, key: &str, value: String) -> aria_core::Result<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(AriaError::storage("store unavailable"));
        }
        *self.writes.lock().unwrap().entry(key.to_string()).or_insert(0) += 1;
        self.values.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_string(&self, key: &str) -> aria_core::Result<Option<String>> {
        Ok(self.get(key))
    }

    async fn set_string(&self, key: &str, value: &str) -> aria_core::Result<()> {
        self.record_write(key, value.to_string())
    }

    async fn get_i64(&self, key: &str) -> aria_core::Result<Option<i64>> {
        Ok(self.get(key).and_then(|v| v.parse().ok()))
    }

    async fn set_i64(&self, key: &str, value: i64) -> aria_core::Result<()> {
        self.record_write(key, value.to_string())
    }

    async fn remove(&self, key: &str) -> aria_core::Result<()> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

// ===== Fixtures =====

/// Build a library of sequentially-numbered tracks
pub fn make_tracks(count: usize) -> Vec<Track> {
    (0..count)
        .map(|i| {
            let mut track = Track::new(
                i.to_string(),
                format!("content://media/audio/{i}"),
                format!("Track {i}"),
            );
            track.artist = Some(format!("Artist {}", i % 3));
            track
        })
        .collect()
}

/// Let the session task and any fire-and-forget writes settle
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}
