//! Security-relevant events, logged at warn with a stable `event` field.

use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

pub const LOGIN_FAILED: &str = "SECURITY_LOGIN_FAILED";
pub const TOKEN_REJECTED: &str = "SECURITY_TOKEN_REJECTED";

/// A login attempt was refused (unknown email or wrong password).
pub fn login_failed(reason: &str, email: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = LOGIN_FAILED,
        %trace_id,
        email = %Redacted(email),
        reason,
        "Authentication failure"
    );
}

/// A presented session token did not verify. The token itself is never logged.
pub fn token_rejected(reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = TOKEN_REJECTED,
        %trace_id,
        reason,
        "Session token rejected"
    );
}
