//! Password hashing (argon2id, PHC string format).

use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::RngCore;
use tracing::error;

use crate::errors::ErrorCode;
use crate::AppError;

/// Hash a secret with a fresh random salt.
pub fn hash_password(secret: &str) -> Result<String, AppError> {
    let mut salt_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut salt_bytes);

    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| {
        AppError::internal(ErrorCode::Internal, format!("Failed to encode salt: {e}"))
    })?;

    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|e| AppError::internal(ErrorCode::Internal, format!("Failed to hash password: {e}")))
}

/// Check a candidate secret against a stored hash.
///
/// A mismatch is `Ok(false)`. A stored hash that cannot be parsed is a
/// store-side fault and is reported as `DataCorruption`.
pub fn verify_password(hashed: &str, candidate: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hashed).map_err(|e| {
        error!(error = %e, "stored password hash is malformed");
        AppError::internal(
            ErrorCode::DataCorruption,
            format!("Malformed password hash: {e}"),
        )
    })?;

    match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => {
            error!(error = %e, "stored password hash could not be verified");
            Err(AppError::internal(
                ErrorCode::DataCorruption,
                format!("Unverifiable password hash: {e}"),
            ))
        }
    }
}
