use std::sync::Arc;

use tracing::{debug, info};

use crate::auth::{
    hash_password, mint_session_token, verify_password, AuthContext, IdentityClaims,
};
use crate::cache::TokenCache;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::logging::security as security_log;
use crate::repos::{NewUser, User, UserChanges, UserRepo};
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Authenticated user as returned to clients.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSession {
    pub email: String,
    pub token: String,
    pub username: String,
    pub bio: Option<String>,
    pub image: Option<String>,
}

impl UserSession {
    fn new(user: User, token: String) -> Self {
        Self {
            email: user.email,
            token,
            username: user.username,
            bio: user.bio,
            image: user.image,
        }
    }
}

/// Requested profile changes. Absent fields are left as they are; an empty
/// `bio` or `image` clears the stored value; an empty password is ignored.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
}

fn require_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::invalid(format!("{field} must not be empty")));
    }
    Ok(())
}

fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| if v.is_empty() { None } else { Some(v) })
}

/// Registration, login and token issuance.
#[derive(Clone)]
pub struct SessionService {
    users: Arc<dyn UserRepo>,
    cache: Arc<dyn TokenCache>,
    security: SecurityConfig,
}

impl SessionService {
    pub fn new(
        users: Arc<dyn UserRepo>,
        cache: Arc<dyn TokenCache>,
        security: SecurityConfig,
    ) -> Self {
        Self {
            users,
            cache,
            security,
        }
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserSession, AppError> {
        require_non_empty("username", username)?;
        require_non_empty("email", email)?;
        require_non_empty("password", password)?;

        let password_hash = hash_password(password)?;
        let user = self
            .users
            .create(NewUser {
                email: email.to_string(),
                username: username.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = user.id, email = %Redacted(&user.email), "user registered");
        let token = self.issue_token(&user.email, &user.username).await?;
        Ok(UserSession::new(user, token))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserSession, AppError> {
        require_non_empty("email", email)?;
        require_non_empty("password", password)?;

        let Some(user) = self.users.find_by_email(email).await? else {
            security_log::login_failed("unknown email", email);
            return Err(AppError::not_found(ErrorCode::UserNotFound, "User not found"));
        };

        if !verify_password(&user.password_hash, password)? {
            security_log::login_failed("password mismatch", email);
            return Err(AppError::invalid_credentials());
        }

        let token = self.issue_token(&user.email, &user.username).await?;
        Ok(UserSession::new(user, token))
    }

    pub async fn current_user(&self, ctx: &AuthContext) -> Result<UserSession, AppError> {
        let claims = ctx.require_claims()?;
        let user = self.load_by_claims(claims).await?;

        let token = self.issue_token(&user.email, &user.username).await?;
        Ok(UserSession::new(user, token))
    }

    pub async fn update_user(
        &self,
        ctx: &AuthContext,
        update: UserUpdate,
    ) -> Result<UserSession, AppError> {
        let claims = ctx.require_claims()?;
        let current = self.load_by_claims(claims).await?;

        if let Some(email) = &update.email {
            require_non_empty("email", email)?;
        }
        if let Some(username) = &update.username {
            require_non_empty("username", username)?;
        }

        let password_hash = match update.password.as_deref() {
            Some(password) if !password.is_empty() => Some(hash_password(password)?),
            _ => None,
        };

        let changes = UserChanges {
            email: update.email,
            username: update.username,
            password_hash,
            bio: clearable(update.bio),
            image: clearable(update.image),
        };
        let user = self.users.update(current.id, changes).await?;

        // Any cached token for the previous identity or the new one is stale.
        self.cache.invalidate(&claims.email, &claims.username).await;
        self.cache.invalidate(&user.email, &user.username).await;
        info!(user_id = user.id, "user updated");

        let token = self.issue_token(&user.email, &user.username).await?;
        Ok(UserSession::new(user, token))
    }

    /// Return the cached token for the pair, or sign and cache a new one.
    pub async fn issue_token(&self, email: &str, username: &str) -> Result<String, AppError> {
        if let Some(token) = self.cache.get(email, username).await {
            debug!(email = %Redacted(email), "token cache hit");
            return Ok(token);
        }

        let token = mint_session_token(username, email, &self.security)?;
        self.cache.put(email, username, &token).await;
        debug!(email = %Redacted(email), "token issued");
        Ok(token)
    }

    async fn load_by_claims(&self, claims: &IdentityClaims) -> Result<User, AppError> {
        self.users
            .find_by_email(&claims.email)
            .await?
            .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "User not found"))
    }
}
