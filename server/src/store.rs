//! # State Store Module
//!
//! Durable home of the queue state. The queue manager owns all domain logic;
//! a store only keeps lists, a set and a counter and applies write batches.
//!
//! ## Backends
//!
//! - [`MemoryStateStore`] - process-local store guarded by async locks
//! - [`RedisStateStore`] - shared store so several server processes see the same queue
//!
//! ## Layout
//!
//! | key              | type            | content                         |
//! |------------------|-----------------|---------------------------------|
//! | `queue`          | list of JSON    | waiting list, queue order       |
//! | `served_tokens`  | list of JSON    | served log, completion order    |
//! | `skipped_tokens` | set of strings  | tokens currently skipped        |
//! | `token_counter`  | integer         | last issued token number        |

pub use self::errors::{StoreError, StoreResult};
pub use self::memory::MemoryStateStore;
pub use self::redis_store::{RedisStateStore, RedisStoreConfig};

/// Store error types
pub mod errors;
/// In-memory backend
pub mod memory;
/// Redis backend
pub mod redis_store;

use crate::model::Entry;
use crate::queue_manager::QueueSnapshot;
use async_trait::async_trait;
use std::collections::HashSet;

pub const WAITING_KEY: &str = "queue";
pub const SERVED_KEY: &str = "served_tokens";
pub const SKIPPED_KEY: &str = "skipped_tokens";
pub const TOKEN_COUNTER_KEY: &str = "token_counter";

/// A group of mutations applied to the store as one atomic step.
///
/// Readers never observe a partially applied batch, so the waiting list,
/// served log and skipped set always agree with each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    /// Replacement for the whole waiting list, if it changed
    pub waiting: Option<Vec<Entry>>,
    /// Entries appended to the served log
    pub served: Vec<Entry>,
    /// Tokens added to the skipped set
    pub skip: Vec<String>,
    /// Tokens removed from the skipped set
    pub unskip: Vec<String>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_waiting(mut self, waiting: Vec<Entry>) -> Self {
        self.waiting = Some(waiting);
        self
    }

    pub fn append_served(mut self, entry: Entry) -> Self {
        self.served.push(entry);
        self
    }

    pub fn add_skipped(mut self, token: impl Into<String>) -> Self {
        self.skip.push(token.into());
        self
    }

    pub fn remove_skipped(mut self, token: impl Into<String>) -> Self {
        self.unskip.push(token.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_none()
            && self.served.is_empty()
            && self.skip.is_empty()
            && self.unskip.is_empty()
    }
}

/// Storage port used by the queue manager.
///
/// Implementations are dumb containers: they never interpret entries beyond
/// (de)serialising them. The manager is handed an `Arc<dyn StateStore>` at
/// construction and keeps it for the process lifetime.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Waiting list in queue order
    async fn load_waiting(&self) -> StoreResult<Vec<Entry>>;

    /// Served log in completion order
    async fn load_served(&self) -> StoreResult<Vec<Entry>>;

    /// Tokens currently marked skipped
    async fn load_skipped(&self) -> StoreResult<HashSet<String>>;

    /// Waiting list, skipped set and served log read as one consistent view.
    /// Never observes half of a concurrently applied batch.
    async fn load_snapshot(&self) -> StoreResult<QueueSnapshot>;

    /// Atomically increments the token counter and returns the new value.
    /// The first call on an empty store returns 1.
    async fn next_token_number(&self) -> StoreResult<u64>;

    /// Applies every mutation in `batch` or none of them.
    async fn apply(&self, batch: WriteBatch) -> StoreResult<()>;

    /// Cheap round trip used for health reporting.
    async fn ping(&self) -> StoreResult<()>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch() {
        assert!(WriteBatch::new().is_empty());
        assert!(!WriteBatch::new().add_skipped("T1").is_empty());
        assert!(!WriteBatch::new().replace_waiting(Vec::new()).is_empty());
    }
}
