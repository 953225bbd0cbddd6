//! Conduit test support utilities
//!
//! Logging bootstrap and Problem Details assertions shared by the backend's
//! integration tests. Nothing here depends on backend types.

pub mod logging;
pub mod problem_details;
