use async_trait::async_trait;

use crate::errors::domain::DomainError;

/// Directed follow edges between users, keyed by user id.
#[async_trait]
pub trait FollowRepo: Send + Sync {
    async fn is_following(&self, follower_id: i64, followee_id: i64)
        -> Result<bool, DomainError>;

    /// Idempotent: following twice leaves a single edge.
    async fn follow(&self, follower_id: i64, followee_id: i64) -> Result<(), DomainError>;

    /// Idempotent: removing a missing edge succeeds.
    async fn unfollow(&self, follower_id: i64, followee_id: i64) -> Result<(), DomainError>;
}
