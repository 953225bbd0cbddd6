use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, error};

use crate::auth::claims::IdentityClaims;
use crate::errors::ErrorCode;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Mint a session token for the given identity.
///
/// Signing is deterministic: the same username, email and secret always
/// produce the same token string, because the only time-related claim is
/// the fixed not-before bound.
pub fn mint_session_token(
    username: &str,
    email: &str,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let claims = IdentityClaims::new(username, email);

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| {
        error!(error = %e, "session token signing failed");
        AppError::internal(ErrorCode::TokenSigning, format!("Failed to encode JWT: {e}"))
    })
}

fn validation(security: &SecurityConfig) -> Validation {
    // Pinning the algorithm list to the configured one rejects `none`
    // and every other HMAC size or key family.
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = false;
    validation.validate_nbf = true;
    validation.set_required_spec_claims(&["nbf"]);
    validation
}

/// Verify a session token and return its claims.
///
/// Every failure (malformed, wrong algorithm, bad signature, not yet valid,
/// missing claims) collapses into `AppError::Unauthorized`. The concrete
/// reason is only logged at debug level.
pub fn verify_session_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<IdentityClaims, AppError> {
    decode::<IdentityClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation(security),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!(reason = ?e.kind(), "session token rejected");
        AppError::unauthorized()
    })
}
