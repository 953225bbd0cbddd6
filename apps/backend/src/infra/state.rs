use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::adapters::{FollowRepoSea, UserRepoSea};
use crate::cache::{MemoryTokenCache, RedisTokenCache, TokenCache, DEFAULT_TOKEN_TTL_SECS};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    database_url: Option<String>,
    redis_url: Option<String>,
    token_cache: Option<Arc<dyn TokenCache>>,
    token_ttl_secs: u64,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            database_url: None,
            redis_url: None,
            token_cache: None,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }

    pub fn with_db(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = Some(database_url.into());
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_redis(mut self, redis_url: Option<String>) -> Self {
        self.redis_url = redis_url;
        self
    }

    /// Use a specific cache instance instead of building one.
    pub fn with_token_cache(mut self, cache: Arc<dyn TokenCache>) -> Self {
        self.token_cache = Some(cache);
        self
    }

    pub fn with_token_ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.token_ttl_secs = ttl_secs;
        self
    }

    async fn build_token_cache(&mut self) -> Result<Arc<dyn TokenCache>, AppError> {
        if let Some(cache) = self.token_cache.take() {
            return Ok(cache);
        }
        match self.redis_url.as_deref() {
            Some(url) => {
                let cache = RedisTokenCache::connect(url, self.token_ttl_secs).await?;
                info!("token cache: redis");
                Ok(Arc::new(cache))
            }
            None => {
                info!("token cache: in-memory");
                Ok(Arc::new(MemoryTokenCache::new(Duration::from_secs(
                    self.token_ttl_secs,
                ))))
            }
        }
    }

    /// Single entrypoint: connect, migrate, and wire the repositories.
    pub async fn build(mut self) -> Result<AppState, AppError> {
        let database_url = self
            .database_url
            .take()
            .ok_or_else(|| AppError::config("database url is required to build state"))?;

        let conn = bootstrap_db(&database_url).await?;
        let token_cache = self.build_token_cache().await?;

        Ok(AppState::new(
            Some(conn.clone()),
            self.security_config,
            Arc::new(UserRepoSea::new(conn.clone())),
            Arc::new(FollowRepoSea::new(conn)),
            token_cache,
        ))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
