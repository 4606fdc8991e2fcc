use super::{StateStore, StoreResult, WriteBatch};
use crate::model::Entry;
use crate::queue_manager::QueueSnapshot;
use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct MemoryState {
    waiting: Vec<Entry>,
    served: Vec<Entry>,
    skipped: HashSet<String>,
    token_counter: u64,
}

/// Process-local [`StateStore`].
///
/// All state lives behind a single `RwLock`, so a batch is applied while
/// holding the write guard and is atomic with respect to readers.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    state: RwLock<MemoryState>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn load_waiting(&self) -> StoreResult<Vec<Entry>> {
        Ok(self.state.read().await.waiting.clone())
    }

    async fn load_served(&self) -> StoreResult<Vec<Entry>> {
        Ok(self.state.read().await.served.clone())
    }

    async fn load_skipped(&self) -> StoreResult<HashSet<String>> {
        Ok(self.state.read().await.skipped.clone())
    }

    async fn load_snapshot(&self) -> StoreResult<QueueSnapshot> {
        let state = self.state.read().await;
        Ok(QueueSnapshot {
            waiting: state.waiting.clone(),
            skipped: state.skipped.clone(),
            served: state.served.clone(),
        })
    }

    async fn next_token_number(&self) -> StoreResult<u64> {
        let mut state = self.state.write().await;
        state.token_counter += 1;
        Ok(state.token_counter)
    }

    async fn apply(&self, batch: WriteBatch) -> StoreResult<()> {
        let mut state = self.state.write().await;

        if let Some(waiting) = batch.waiting {
            state.waiting = waiting;
        }
        state.served.extend(batch.served);
        for token in batch.skip {
            state.skipped.insert(token);
        }
        for token in &batch.unskip {
            state.skipped.remove(token);
        }
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
