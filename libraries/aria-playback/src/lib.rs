//! Aria Player - Playback Session
//!
//! The playback session controller: owns the authoritative "what is loaded /
//! what index / playing or not / repeat / shuffle" state, drives the external
//! media engine, and remembers where the user was across restarts.
//!
//! # Architecture
//!
//! A single task owns all mutable state ([`PlaybackSession`]); clients hold a
//! cloneable [`SessionHandle`] and communicate over channels. The engine is a
//! concurrent actor behind the [`MediaEngine`] trait whose callbacks arrive
//! as [`EngineEvent`]s on a channel into the same task, so command-driven and
//! callback-driven mutation share one serialization point. There is no
//! shared mutable playback state anywhere.
//!
//! Persistence follows two paths:
//! - a deferred path: sampled positions pass a threshold-plus-debounce filter
//!   ([`PositionDebouncer`]) before being written, bounding write frequency;
//! - an immediate path: pause, seek, and confirmed track changes write
//!   straight through, because those are the moments the process is most
//!   likely to die next.
//!
//! On launch, [`SessionHandle::restore`] re-attaches the persisted record to
//! a freshly assembled playlist without starting playback and without
//! triggering the write-back the programmatic seek would otherwise cause
//! (see [`restore::SessionMode`]).
//!
//! # Example
//!
//! ```no_run
//! use aria_playback::{engine_channel, PlaybackSession, SessionConfig, PlaybackSelection};
//! use aria_core::{KeyValueStore, PlaylistKind};
//! use std::sync::Arc;
//!
//! # async fn example(
//! #     engine: Box<dyn aria_playback::MediaEngine>,
//! #     store: Arc<dyn KeyValueStore>,
//! #     tracks: Vec<aria_core::Track>,
//! # ) -> aria_playback::Result<()> {
//! let (_engine_tx, engine_rx) = engine_channel();
//! let session = PlaybackSession::spawn(engine, engine_rx, Arc::clone(&store), SessionConfig::default());
//!
//! session.set_playlist(PlaybackSelection {
//!     playlist_name: "All tracks".to_string(),
//!     kind: PlaylistKind::All,
//!     tracks,
//! }).await?;
//!
//! let record = PlaybackSession::load_persisted(&store).await;
//! session.restore(record).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod events;
pub mod persist;
pub mod restore;
pub mod session;
pub mod tracker;
pub mod types;

pub use engine::{engine_channel, EngineEvent, MediaEngine};
pub use error::{PlaybackError, Result};
pub use events::SessionEvent;
pub use persist::{PersistedPlaybackRecord, PersistenceGateway, KEY_LAST_POSITION_MS, KEY_LAST_TRACK_ID};
pub use session::{PlaybackSession, SessionCommand, SessionHandle};
pub use tracker::PositionDebouncer;
pub use types::{PlaybackPosition, PlaybackSelection, RepeatMode, SessionConfig, SessionSnapshot};
