//! Usecases behind the HTTP routes.

pub mod profiles;
pub mod session;

#[cfg(test)]
pub(crate) mod fakes;

pub use profiles::{Profile, ProfileService};
pub use session::{SessionService, UserSession, UserUpdate};
