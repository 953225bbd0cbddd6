use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tokio::sync::Mutex;
use tracing::warn;

use super::TokenCache;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::AppError;

const KEY_PREFIX: &str = "conduit:token";

/// Shared token cache backed by Redis, for multi-instance deployments.
///
/// Every Redis failure is logged and swallowed: a failing `get` reads as
/// a miss, failing writes are dropped.
pub struct RedisTokenCache {
    conn: Mutex<ConnectionManager>,
    ttl_secs: u64,
}

impl RedisTokenCache {
    pub async fn connect(redis_url: &str, ttl_secs: u64) -> Result<Self, AppError> {
        let client = Client::open(redis_url)
            .map_err(|err| AppError::config(format!("Invalid REDIS_URL: {err}")))?;

        let manager = ConnectionManager::new(client).await.map_err(|err| {
            AppError::internal(
                ErrorCode::ConfigError,
                format!("Unable to initialize Redis connection manager: {err}"),
            )
        })?;

        Ok(Self {
            conn: Mutex::new(manager),
            ttl_secs,
        })
    }

    /// The email length prefix keeps keys unique when either part
    /// contains `:`.
    fn key(email: &str, username: &str) -> String {
        format!("{KEY_PREFIX}:{}:{email}:{username}", email.len())
    }
}

#[async_trait]
impl TokenCache for RedisTokenCache {
    async fn get(&self, email: &str, username: &str) -> Option<String> {
        let mut conn = self.conn.lock().await;
        match conn.get::<_, Option<String>>(Self::key(email, username)).await {
            Ok(token) => token,
            Err(err) => {
                warn!(email = %Redacted(email), error = %err, "token cache read failed");
                None
            }
        }
    }

    async fn put(&self, email: &str, username: &str, token: &str) {
        let mut conn = self.conn.lock().await;
        if let Err(err) = conn
            .set_ex::<_, _, ()>(Self::key(email, username), token, self.ttl_secs)
            .await
        {
            warn!(email = %Redacted(email), error = %err, "token cache write failed");
        }
    }

    async fn invalidate(&self, email: &str, username: &str) {
        let mut conn = self.conn.lock().await;
        if let Err(err) = conn.del::<_, ()>(Self::key(email, username)).await {
            warn!(email = %Redacted(email), error = %err, "token cache invalidation failed");
        }
    }
}
