/// Collaborator traits for Aria Player
use crate::error::Result;
use crate::types::RawMediaRecord;
use async_trait::async_trait;

/// Host content-index collaborator
///
/// The host OS exposes its media index through this trait. The query is
/// coarse: it returns every record the index classifies as music, and
/// fine-grained folder scoping is done by the library scanner, not delegated
/// to the index.
#[async_trait]
pub trait ContentIndex: Send + Sync {
    /// Query all music records known to the host index
    ///
    /// Result order is the index's own order (typically most-recently-added
    /// first) and must be preserved by callers that care about it.
    ///
    /// # Errors
    /// Returns an error if the underlying host query fails. Callers in this
    /// workspace treat a failure as an empty library, never as fatal.
    async fn query_music(&self) -> Result<Vec<RawMediaRecord>>;
}

/// Durable key-value persistence collaborator
///
/// A small async get/set surface over string keys, durable across process
/// restarts. No multi-key transactional guarantee is assumed: callers that
/// need two values to agree must order their writes accordingly.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get a string value
    async fn get_string(&self, key: &str) -> Result<Option<String>>;

    /// Set a string value, overwriting any previous value
    async fn set_string(&self, key: &str, value: &str) -> Result<()>;

    /// Get an integer value
    async fn get_i64(&self, key: &str) -> Result<Option<i64>>;

    /// Set an integer value, overwriting any previous value
    async fn set_i64(&self, key: &str, value: i64) -> Result<()>;

    /// Remove a value (absent key is not an error)
    async fn remove(&self, key: &str) -> Result<()>;
}
