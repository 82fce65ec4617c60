// src/portal/query.rs

//! Request-deduplicating response cache keyed by (resource, id, page).

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::OnceCell;

use crate::portal::client::ClientError;

/// Identifies one cached response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: &'static str,
    pub id: Option<i64>,
    pub page: Option<u32>,
}

impl QueryKey {
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            id: None,
            page: None,
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

type Value = Arc<dyn Any + Send + Sync>;
type Slot = Arc<OnceCell<Value>>;

#[derive(Default)]
struct Entries {
    generation: u64,
    slots: HashMap<QueryKey, Slot>,
}

/// Shared cache of backend responses.
///
/// Concurrent fetches of one key share a single in-flight request. Failed
/// loads leave no entry behind, so the next fetch retries. Every key must
/// always be loaded with the same value type.
#[derive(Default)]
pub struct QueryCache {
    entries: Mutex<Entries>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the cached value for `key`, running `loader` if there is none.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, loader: F) -> Result<T, ClientError>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let (slot, generation) = {
            let mut entries = self.lock();
            let slot = entries.slots.entry(key.clone()).or_default().clone();
            (slot, entries.generation)
        };

        let value = slot
            .get_or_try_init(move || async move {
                let loaded = loader().await?;
                Ok::<Value, ClientError>(Arc::new(loaded))
            })
            .await?;

        if self.lock().generation != generation {
            // Invalidated while in flight: the slot is already detached from
            // the map, so this response only reaches its own caller.
            tracing::debug!(resource = key.resource, "Stale response not cached");
        }

        value
            .downcast_ref::<T>()
            .cloned()
            .ok_or(ClientError::CacheType(key.resource))
    }

    /// Drops every entry; responses still in flight will not be stored.
    pub fn invalidate_all(&self) {
        let mut entries = self.lock();
        entries.generation += 1;
        entries.slots.clear();
        tracing::debug!(generation = entries.generation, "Query cache invalidated");
    }

    /// Number of keys currently holding a loaded value.
    pub fn len(&self) -> usize {
        self.lock()
            .slots
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn second_fetch_is_served_from_cache() {
        let cache = QueryCache::new();
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let load = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ClientError>(vec![1, 2, 3])
        };

        let first: Vec<i32> = cache.fetch(QueryKey::new("words").page(1), load).await.unwrap();
        let second: Vec<i32> = cache.fetch(QueryKey::new("words").page(1), load).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn different_pages_are_different_keys() {
        let cache = QueryCache::new();
        let one: u32 = cache.fetch(QueryKey::new("words").page(1), || async { Ok::<_, ClientError>(1) }).await.unwrap();
        let two: u32 = cache.fetch(QueryKey::new("words").page(2), || async { Ok::<_, ClientError>(2) }).await.unwrap();
        assert_eq!((one, two), (1, 2));
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn concurrent_fetches_share_one_request() {
        let cache = QueryCache::new();
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let load = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, ClientError>("group".to_string())
        };

        let key = QueryKey::new("group").id(4);
        let (a, b) = tokio::join!(cache.fetch(key.clone(), load), cache.fetch(key.clone(), load));

        assert_eq!(a.unwrap(), "group");
        assert_eq!(b.unwrap(), "group");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cache = QueryCache::new();
        let key = QueryKey::new("word").id(1);

        let failed: Result<u8, _> = cache
            .fetch(key.clone(), || async {
                Err(ClientError::Status {
                    status: StatusCode::BAD_GATEWAY,
                    body: String::new(),
                })
            })
            .await;
        assert!(failed.is_err());
        assert!(cache.is_empty());

        let ok: u8 = cache.fetch(key, || async { Ok::<_, ClientError>(7) }).await.unwrap();
        assert_eq!(ok, 7);
    }

    #[tokio::test]
    async fn invalidate_all_forces_reload() {
        let cache = QueryCache::new();
        let key = QueryKey::new("quick_stats");

        let _: u8 = cache.fetch(key.clone(), || async { Ok::<_, ClientError>(1) }).await.unwrap();
        cache.invalidate_all();
        let reloaded: u8 = cache.fetch(key, || async { Ok::<_, ClientError>(2) }).await.unwrap();

        assert_eq!(reloaded, 2);
    }

    #[tokio::test]
    async fn response_arriving_after_invalidation_is_not_stored() {
        let cache = QueryCache::new();
        let key = QueryKey::new("study_sessions").page(1);

        let slow = cache.fetch(key.clone(), || async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            Ok::<_, ClientError>(1u8)
        });
        let invalidate = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            cache.invalidate_all();
        };
        let (stale, ()) = tokio::join!(slow, invalidate);
        assert_eq!(stale.unwrap(), 1);

        let fresh: u8 = cache.fetch(key, || async { Ok::<_, ClientError>(2) }).await.unwrap();
        assert_eq!(fresh, 2);
    }

    #[tokio::test]
    async fn reading_a_key_as_another_type_fails() {
        let cache = QueryCache::new();
        let key = QueryKey::new("word").id(1);
        let _: u8 = cache.fetch(key.clone(), || async { Ok::<_, ClientError>(1) }).await.unwrap();

        let err = cache
            .fetch::<String, _, _>(key, || async { Ok::<_, ClientError>(String::new()) })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::CacheType("word")));
    }
}
