//! SeaORM adapter for the follow repository.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};

use crate::entities::follows;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;
use crate::repos::follows::FollowRepo;

#[derive(Debug, Clone)]
pub struct FollowRepoSea {
    db: DatabaseConnection,
}

impl FollowRepoSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FollowRepo for FollowRepoSea {
    async fn is_following(
        &self,
        follower_id: i64,
        followee_id: i64,
    ) -> Result<bool, DomainError> {
        let count = follows::Entity::find()
            .filter(follows::Column::FollowerId.eq(follower_id))
            .filter(follows::Column::FolloweeId.eq(followee_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(count > 0)
    }

    async fn follow(&self, follower_id: i64, followee_id: i64) -> Result<(), DomainError> {
        let edge = follows::ActiveModel {
            follower_id: Set(follower_id),
            followee_id: Set(followee_id),
            created_at: Set(time::OffsetDateTime::now_utc()),
        };

        follows::Entity::insert(edge)
            .on_conflict(
                OnConflict::columns([follows::Column::FollowerId, follows::Column::FolloweeId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn unfollow(&self, follower_id: i64, followee_id: i64) -> Result<(), DomainError> {
        follows::Entity::delete_many()
            .filter(follows::Column::FollowerId.eq(follower_id))
            .filter(follows::Column::FolloweeId.eq(followee_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }
}
