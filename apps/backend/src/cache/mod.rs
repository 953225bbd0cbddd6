//! Token cache: identity pair (email, username) -> last issued session token.
//!
//! The cache is an issuance optimization only. Token validity is always
//! re-derived from signature verification, never from cache presence, so
//! every backend treats its own failures as a miss.

use async_trait::async_trait;

pub mod memory;
pub mod redis;

pub use self::memory::MemoryTokenCache;
pub use self::redis::RedisTokenCache;

/// Default entry lifetime when none is configured.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

#[async_trait]
pub trait TokenCache: Send + Sync {
    /// Previously issued token for the pair, if any.
    async fn get(&self, email: &str, username: &str) -> Option<String>;

    /// Store `token` for the pair, replacing any previous entry. Best-effort.
    async fn put(&self, email: &str, username: &str, token: &str);

    /// Drop the entry for the pair. Best-effort.
    async fn invalidate(&self, email: &str, username: &str);
}
