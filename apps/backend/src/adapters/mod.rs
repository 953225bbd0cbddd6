//! SeaORM implementations of the repository traits.

pub mod follows_sea;
pub mod users_sea;

pub use follows_sea::FollowRepoSea;
pub use users_sea::UserRepoSea;
