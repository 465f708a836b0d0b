//! Aria Player Storage
//!
//! Local `SQLite` persistence for Aria Player.
//!
//! The host media index owns the tracks; this database owns what the user
//! did with them:
//!
//! - **Key-value state** ([`kv`]): the persisted playback record, scope
//!   folders, and other small durable values, behind the
//!   [`aria_core::KeyValueStore`] trait via [`SqliteStore`].
//! - **Metadata overrides** ([`overrides`]): user edits layered over scanned
//!   metadata.
//! - **Favorites** ([`favorites`]): starred track ids.
//! - **Playlists** ([`playlists`]): user playlists with ordered,
//!   deduplicated track references.
//! - **Search history** ([`search_history`]): bounded, newest-first, with
//!   case-insensitive dedup.
//!
//! Each feature owns its own queries (vertical slicing): free functions over
//! a `&SqlitePool`.
//!
//! # Example
//!
//! ```rust,no_run
//! use aria_storage::{create_pool, run_migrations, SqliteStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://aria.db").await?;
//! run_migrations(&pool).await?;
//!
//! // KeyValueStore implementation for the playback session.
//! let store = SqliteStore::new(pool.clone());
//!
//! let favorites = aria_storage::favorites::get_all(&pool).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;

// Vertical slices
pub mod favorites;
pub mod kv;
pub mod overrides;
pub mod playlists;
pub mod search_history;

pub use error::StorageError;
pub use kv::SqliteStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into the binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Called once at startup to bring the schema up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g. `sqlite://aria.db`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true) // Playlist deletion relies on cascading references
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("Opened SQLite pool for {database_url}");

    Ok(pool)
}
