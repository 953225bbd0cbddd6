pub mod claims;
pub mod context;
pub mod jwt;
pub mod password;

pub use claims::{IdentityClaims, FIXED_NOT_BEFORE};
pub use context::AuthContext;
pub use jwt::{mint_session_token, verify_session_token};
pub use password::{hash_password, verify_password};
