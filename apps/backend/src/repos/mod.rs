//! Repository traits for the domain layer.

pub mod follows;
pub mod users;

pub use follows::FollowRepo;
pub use users::{NewUser, User, UserChanges, UserRepo};
