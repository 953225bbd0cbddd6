//! In-memory repository fakes for service tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::{FollowRepo, NewUser, User, UserChanges, UserRepo};

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
}

fn check_unique(
    rows: &[User],
    skip_id: Option<i64>,
    email: &str,
    username: &str,
) -> Result<(), DomainError> {
    let others = rows.iter().filter(|u| Some(u.id) != skip_id);
    for user in others {
        if user.email == email {
            return Err(DomainError::conflict(
                ConflictKind::UniqueEmail,
                "Email already registered",
            ));
        }
        if user.username == username {
            return Err(DomainError::conflict(
                ConflictKind::UniqueUsername,
                "Username already taken",
            ));
        }
    }
    Ok(())
}

#[async_trait]
impl UserRepo for InMemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.username == username).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        check_unique(&rows, None, &user.email, &user.username)?;

        let now = time::OffsetDateTime::now_utc();
        let created = User {
            id: rows.len() as i64 + 1,
            email: user.email,
            username: user.username,
            password_hash: user.password_hash,
            bio: None,
            image: None,
            created_at: now,
            updated_at: now,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<User, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let mut updated = rows
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(NotFoundKind::User, "User not found"))?;

        if let Some(email) = changes.email {
            updated.email = email;
        }
        if let Some(username) = changes.username {
            updated.username = username;
        }
        if let Some(password_hash) = changes.password_hash {
            updated.password_hash = password_hash;
        }
        if let Some(bio) = changes.bio {
            updated.bio = bio;
        }
        if let Some(image) = changes.image {
            updated.image = image;
        }
        check_unique(&rows, Some(id), &updated.email, &updated.username)?;

        updated.updated_at = time::OffsetDateTime::now_utc();
        if let Some(slot) = rows.iter_mut().find(|u| u.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }
}

#[derive(Default)]
pub struct InMemoryFollows {
    edges: Mutex<HashSet<(i64, i64)>>,
}

#[async_trait]
impl FollowRepo for InMemoryFollows {
    async fn is_following(
        &self,
        follower_id: i64,
        followee_id: i64,
    ) -> Result<bool, DomainError> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .contains(&(follower_id, followee_id)))
    }

    async fn follow(&self, follower_id: i64, followee_id: i64) -> Result<(), DomainError> {
        self.edges.lock().unwrap().insert((follower_id, followee_id));
        Ok(())
    }

    async fn unfollow(&self, follower_id: i64, followee_id: i64) -> Result<(), DomainError> {
        self.edges
            .lock()
            .unwrap()
            .remove(&(follower_id, followee_id));
        Ok(())
    }
}
