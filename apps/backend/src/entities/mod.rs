pub mod follows;
pub mod users;

pub use follows::Entity as Follows;
pub use follows::Model as Follow;
pub use users::Entity as Users;
pub use users::Model as User;
