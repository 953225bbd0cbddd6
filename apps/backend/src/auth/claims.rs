//! Identity claims carried inside session tokens.

use serde::{Deserialize, Serialize};

/// Fixed not-before bound embedded in every issued token
/// (2015-10-10T12:00:00Z). Tokens carry no issuance time and no expiry.
pub const FIXED_NOT_BEFORE: i64 = 1_444_478_400;

/// Typed identity payload. All fields are required when decoding, so a
/// verified token always yields a complete identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub email: String,
    pub username: String,
    /// Not-before (seconds since epoch)
    pub nbf: i64,
}

impl IdentityClaims {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            nbf: FIXED_NOT_BEFORE,
        }
    }
}
