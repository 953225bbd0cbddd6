use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use super::TokenCache;

const DEFAULT_MAX_ENTRIES: u64 = 100_000;

/// In-process token cache backed by moka.
#[derive(Clone)]
pub struct MemoryTokenCache {
    inner: Cache<(String, String), String>,
}

impl MemoryTokenCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, DEFAULT_MAX_ENTRIES)
    }

    pub fn with_capacity(ttl: Duration, max_entries: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { inner }
    }
}

impl Default for MemoryTokenCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(super::DEFAULT_TOKEN_TTL_SECS))
    }
}

fn key(email: &str, username: &str) -> (String, String) {
    (email.to_string(), username.to_string())
}

#[async_trait]
impl TokenCache for MemoryTokenCache {
    async fn get(&self, email: &str, username: &str) -> Option<String> {
        self.inner.get(&key(email, username)).await
    }

    async fn put(&self, email: &str, username: &str, token: &str) {
        self.inner
            .insert(key(email, username), token.to_string())
            .await;
    }

    async fn invalidate(&self, email: &str, username: &str) {
        self.inner.invalidate(&key(email, username)).await;
    }
}
