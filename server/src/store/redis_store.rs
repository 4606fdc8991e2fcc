use super::{
    SERVED_KEY, SKIPPED_KEY, StateStore, StoreError, StoreResult, TOKEN_COUNTER_KEY, WAITING_KEY,
    WriteBatch,
};
use crate::model::Entry;
use crate::queue_manager::QueueSnapshot;
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde::Deserialize;
use std::collections::HashSet;

/// Connection settings for [`RedisStateStore`].
#[derive(Debug, Clone, Deserialize)]
pub struct RedisStoreConfig {
    /// Connection URL, e.g. `redis://127.0.0.1:6379/0`
    pub url: String,
    /// Prepended to every key. Empty keeps the bare `queue`/`served_tokens` layout.
    #[serde(default)]
    pub key_prefix: String,
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379/0".to_string(),
            key_prefix: String::new(),
        }
    }
}

/// [`StateStore`] backed by Redis, shared by every server process pointing at
/// the same database.
///
/// Lists hold JSON-encoded entries. Batches run inside `MULTI`/`EXEC` so the
/// waiting list, served log and skipped set change together.
pub struct RedisStateStore {
    conn: ConnectionManager,
    config: RedisStoreConfig,
}

impl RedisStateStore {
    /// Opens a managed connection; the manager reconnects on its own after drops.
    pub async fn connect(config: RedisStoreConfig) -> StoreResult<Self> {
        let client = redis::Client::open(config.url.as_str()).map_err(|e| {
            StoreError::Connection {
                reason: format!("Failed to create Redis client: {e}"),
            }
        })?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection {
                reason: format!("Failed to connect to Redis at {}: {e}", config.url),
            })?;

        log::info!(
            "Connected to Redis state store (prefix: '{}')",
            config.key_prefix
        );
        Ok(Self { conn, config })
    }

    fn key(&self, name: &str) -> String {
        format!("{}{}", self.config.key_prefix, name)
    }

    fn encode(key: &str, entry: &Entry) -> StoreResult<String> {
        serde_json::to_string(entry).map_err(|e| StoreError::serialization(key, e))
    }

    fn decode_all(key: &str, raw: Vec<String>) -> StoreResult<Vec<Entry>> {
        raw.iter()
            .map(|item| serde_json::from_str(item).map_err(|e| StoreError::serialization(key, e)))
            .collect()
    }

    async fn load_list(&self, name: &str) -> StoreResult<Vec<Entry>> {
        let key = self.key(name);
        let mut conn = self.conn.clone();
        let raw: Vec<String> = conn
            .lrange(&key, 0, -1)
            .await
            .map_err(|e| StoreError::command("LRANGE", e))?;
        Self::decode_all(&key, raw)
    }
}

#[async_trait]
impl StateStore for RedisStateStore {
    async fn load_waiting(&self) -> StoreResult<Vec<Entry>> {
        self.load_list(WAITING_KEY).await
    }

    async fn load_served(&self) -> StoreResult<Vec<Entry>> {
        self.load_list(SERVED_KEY).await
    }

    async fn load_skipped(&self) -> StoreResult<HashSet<String>> {
        let mut conn = self.conn.clone();
        conn.smembers(self.key(SKIPPED_KEY))
            .await
            .map_err(|e| StoreError::command("SMEMBERS", e))
    }

    async fn load_snapshot(&self) -> StoreResult<QueueSnapshot> {
        let waiting_key = self.key(WAITING_KEY);
        let served_key = self.key(SERVED_KEY);

        let mut conn = self.conn.clone();
        let (waiting, skipped, served): (Vec<String>, HashSet<String>, Vec<String>) =
            redis::pipe()
                .atomic()
                .lrange(&waiting_key, 0, -1)
                .smembers(self.key(SKIPPED_KEY))
                .lrange(&served_key, 0, -1)
                .query_async(&mut conn)
                .await
                .map_err(|e| StoreError::command("MULTI/EXEC", e))?;

        Ok(QueueSnapshot {
            waiting: Self::decode_all(&waiting_key, waiting)?,
            skipped,
            served: Self::decode_all(&served_key, served)?,
        })
    }

    async fn next_token_number(&self) -> StoreResult<u64> {
        let mut conn = self.conn.clone();
        conn.incr(self.key(TOKEN_COUNTER_KEY), 1u64)
            .await
            .map_err(|e| StoreError::command("INCR", e))
    }

    async fn apply(&self, batch: WriteBatch) -> StoreResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let waiting_key = self.key(WAITING_KEY);
        let served_key = self.key(SERVED_KEY);
        let skipped_key = self.key(SKIPPED_KEY);

        let mut pipe = redis::pipe();
        pipe.atomic();

        if let Some(waiting) = &batch.waiting {
            let encoded = waiting
                .iter()
                .map(|entry| Self::encode(&waiting_key, entry))
                .collect::<StoreResult<Vec<_>>>()?;
            pipe.del(&waiting_key).ignore();
            if !encoded.is_empty() {
                pipe.rpush(&waiting_key, encoded).ignore();
            }
        }

        if !batch.served.is_empty() {
            let encoded = batch
                .served
                .iter()
                .map(|entry| Self::encode(&served_key, entry))
                .collect::<StoreResult<Vec<_>>>()?;
            pipe.rpush(&served_key, encoded).ignore();
        }

        if !batch.skip.is_empty() {
            pipe.sadd(&skipped_key, &batch.skip).ignore();
        }
        if !batch.unskip.is_empty() {
            pipe.srem(&skipped_key, &batch.unskip).ignore();
        }

        let mut conn = self.conn.clone();
        let _: () = pipe
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::command("MULTI/EXEC", e))?;
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::command("PING", e))?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_prefix() {
        let config = RedisStoreConfig::default();
        assert!(config.key_prefix.is_empty());
        assert!(config.url.starts_with("redis://"));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = RedisStateStore::decode_all("queue", vec!["not json".to_string()]);
        assert!(matches!(result, Err(StoreError::Serialization { .. })));
    }

    #[test]
    fn test_decode_legacy_entries() {
        let raw = vec![
            r#"{"token":"T1","name":"Alice","phone":"555","service_type":"haircut"}"#.to_string(),
            r#"{"token":"T2","name":"Bob","phone":"556","service_type":"haircut","status":"skipped"}"#
                .to_string(),
        ];
        let entries = RedisStateStore::decode_all("queue", raw).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].status, crate::model::EntryStatus::Skipped);
    }

    async fn connect_from_env() -> Option<RedisStateStore> {
        let url = std::env::var("WALKIN_TEST_REDIS_URL").ok()?;
        let config = RedisStoreConfig {
            url,
            key_prefix: format!("walkin-test:{}:", std::process::id()),
        };
        RedisStateStore::connect(config).await.ok()
    }

    #[tokio::test]
    #[ignore = "requires WALKIN_TEST_REDIS_URL"]
    async fn test_redis_batch_round_trip() {
        let Some(store) = connect_from_env().await else {
            return;
        };
        store.ping().await.unwrap();

        let first = store.next_token_number().await.unwrap();
        let second = store.next_token_number().await.unwrap();
        assert_eq!(second, first + 1);

        let entry = Entry::new(
            "T1".to_string(),
            "Alice".to_string(),
            "555".to_string(),
            "haircut".to_string(),
        );
        store
            .apply(
                WriteBatch::new()
                    .replace_waiting(vec![entry.clone()])
                    .add_skipped("T1"),
            )
            .await
            .unwrap();
        assert_eq!(store.load_waiting().await.unwrap(), vec![entry.clone()]);
        assert!(store.load_skipped().await.unwrap().contains("T1"));

        let snapshot = store.load_snapshot().await.unwrap();
        assert_eq!(snapshot.waiting, vec![entry.clone()]);
        assert!(snapshot.skipped.contains("T1"));
        assert!(snapshot.served.is_empty());

        store
            .apply(
                WriteBatch::new()
                    .replace_waiting(Vec::new())
                    .append_served(entry)
                    .remove_skipped("T1"),
            )
            .await
            .unwrap();
        assert!(store.load_waiting().await.unwrap().is_empty());
        assert_eq!(store.load_served().await.unwrap().len(), 1);
    }
}
