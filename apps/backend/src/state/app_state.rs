use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::cache::TokenCache;
use crate::repos::{FollowRepo, UserRepo};
use crate::services::profiles::ProfileService;
use crate::services::session::SessionService;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection, used for health checks (absent with in-memory repos)
    pub db: Option<DatabaseConnection>,
    /// Token signing and header configuration
    pub security: SecurityConfig,
    pub users: Arc<dyn UserRepo>,
    pub follows: Arc<dyn FollowRepo>,
    pub token_cache: Arc<dyn TokenCache>,
}

impl AppState {
    pub fn new(
        db: Option<DatabaseConnection>,
        security: SecurityConfig,
        users: Arc<dyn UserRepo>,
        follows: Arc<dyn FollowRepo>,
        token_cache: Arc<dyn TokenCache>,
    ) -> Self {
        Self {
            db,
            security,
            users,
            follows,
            token_cache,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn sessions(&self) -> SessionService {
        SessionService::new(
            self.users.clone(),
            self.token_cache.clone(),
            self.security.clone(),
        )
    }

    pub fn profiles(&self) -> ProfileService {
        ProfileService::new(self.users.clone(), self.follows.clone())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .field("auth_scheme", &self.security.auth_scheme)
            .finish_non_exhaustive()
    }
}
