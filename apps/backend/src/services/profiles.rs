use std::sync::Arc;

use tracing::info;

use crate::auth::AuthContext;
use crate::errors::ErrorCode;
use crate::repos::{FollowRepo, User, UserRepo};
use crate::AppError;

/// Public view of a user, relative to the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub username: String,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub following: bool,
}

impl Profile {
    fn new(user: User, following: bool) -> Self {
        Self {
            username: user.username,
            bio: user.bio,
            image: user.image,
            following,
        }
    }
}

#[derive(Clone)]
pub struct ProfileService {
    users: Arc<dyn UserRepo>,
    follows: Arc<dyn FollowRepo>,
}

impl ProfileService {
    pub fn new(users: Arc<dyn UserRepo>, follows: Arc<dyn FollowRepo>) -> Self {
        Self { users, follows }
    }

    pub async fn get_profile(&self, ctx: &AuthContext, username: &str) -> Result<Profile, AppError> {
        let (viewer, target) = self.resolve(ctx, username).await?;
        let following = self.follows.is_following(viewer.id, target.id).await?;
        Ok(Profile::new(target, following))
    }

    pub async fn follow(&self, ctx: &AuthContext, username: &str) -> Result<Profile, AppError> {
        let (viewer, target) = self.resolve(ctx, username).await?;
        self.follows.follow(viewer.id, target.id).await?;
        info!(follower_id = viewer.id, followee_id = target.id, "followed");
        Ok(Profile::new(target, true))
    }

    pub async fn unfollow(&self, ctx: &AuthContext, username: &str) -> Result<Profile, AppError> {
        let (viewer, target) = self.resolve(ctx, username).await?;
        self.follows.unfollow(viewer.id, target.id).await?;
        info!(follower_id = viewer.id, followee_id = target.id, "unfollowed");
        Ok(Profile::new(target, false))
    }

    /// Current user (from the claims email) and the target profile owner.
    async fn resolve(&self, ctx: &AuthContext, username: &str) -> Result<(User, User), AppError> {
        let claims = ctx.require_claims()?;

        let viewer = self
            .users
            .find_by_email(&claims.email)
            .await?
            .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "User not found"))?;
        let target = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::not_found(ErrorCode::ProfileNotFound, "Profile not found")
            })?;

        Ok((viewer, target))
    }
}
