//! Request deduplication cache.
//!
//! Read-through cache sitting above the `ApiClient`, keyed by
//! `ApiClient::cache_key`. Because the key carries the bearer token,
//! responses fetched under one identity are never served to another,
//! even for the same logical path.

use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::api::ApiClient;

/// Consider a cached response stale after 60 seconds unless configured
/// otherwise.
const DEFAULT_MAX_AGE_SECONDS: i64 = 60;

#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub data: Value,
    pub cached_at: DateTime<Utc>,
}

impl CachedResponse {
    fn new(data: Value) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age(&self) -> Duration {
        Utc::now() - self.cached_at
    }

    pub fn is_stale(&self, max_age: Duration) -> bool {
        self.age() > max_age
    }
}

/// In-memory response cache shared by resource readers.
#[derive(Debug)]
pub struct RequestCache {
    entries: RwLock<HashMap<String, CachedResponse>>,
    max_age: Duration,
}

impl Default for RequestCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestCache {
    pub fn new() -> Self {
        Self::with_max_age(Duration::seconds(DEFAULT_MAX_AGE_SECONDS))
    }

    /// Create a cache whose entries go stale after `max_age`.
    pub fn with_max_age(max_age: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_age,
        }
    }

    /// GET `path` through `client`, serving a fresh cached response when
    /// one exists for this client's cache key.
    pub async fn get(&self, client: &ApiClient, path: &str) -> Result<Value> {
        let key = client.cache_key(path);

        {
            let entries = self.entries.read().await;
            if let Some(hit) = entries.get(&key) {
                if !hit.is_stale(self.max_age) {
                    debug!(key = %key, "request cache hit");
                    return Ok(hit.data.clone());
                }
            }
        }

        let data: Value = client.get(path).await?;
        let mut entries = self.entries.write().await;
        entries.insert(key, CachedResponse::new(data.clone()));
        Ok(data)
    }

    /// Drop the entry for `path` under this client's identity.
    pub async fn invalidate(&self, client: &ApiClient, path: &str) {
        let key = client.cache_key(path);
        self.entries.write().await.remove(&key);
    }

    /// Drop every cached response.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
