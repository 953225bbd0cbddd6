//! SeaORM adapter for the user repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::entities::users;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db_errors::map_db_err;
use crate::repos::users::{NewUser, User, UserChanges, UserRepo};

#[derive(Debug, Clone)]
pub struct UserRepoSea {
    db: DatabaseConnection,
}

impl UserRepoSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: i64) -> Result<users::Model, DomainError> {
        users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| DomainError::not_found(NotFoundKind::User, "User not found"))
    }
}

#[async_trait]
impl UserRepo for UserRepoSea {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(user.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(user.map(User::from))
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let now = time::OffsetDateTime::now_utc();
        let active = users::ActiveModel {
            id: NotSet,
            email: Set(user.email),
            username: Set(user.username),
            password_hash: Set(user.password_hash),
            bio: Set(None),
            image: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active.insert(&self.db).await.map_err(map_db_err)?;
        Ok(User::from(model))
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<User, DomainError> {
        let model = self.find_model(id).await?;
        if changes.is_empty() {
            return Ok(User::from(model));
        }

        let mut active: users::ActiveModel = model.into();
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(username) = changes.username {
            active.username = Set(username);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(bio) = changes.bio {
            active.bio = Set(bio);
        }
        if let Some(image) = changes.image {
            active.image = Set(image);
        }
        active.updated_at = Set(time::OffsetDateTime::now_utc());

        let model = active.update(&self.db).await.map_err(map_db_err)?;
        Ok(User::from(model))
    }
}
