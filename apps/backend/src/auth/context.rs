//! Request-scoped identity.
//!
//! `JwtExtract` derives one `AuthContext` per request and stores it in that
//! request's extensions; handlers and services only ever read it.

use crate::auth::claims::IdentityClaims;
use crate::AppError;

/// Zero-or-one verified identity for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    claims: Option<IdentityClaims>,
}

impl AuthContext {
    /// Context for a request that carries no verified identity.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Derive a context carrying `claims`. `self` is left untouched.
    #[must_use]
    pub fn with_claims(&self, claims: IdentityClaims) -> Self {
        Self {
            claims: Some(claims),
        }
    }

    pub fn claims(&self) -> Option<&IdentityClaims> {
        self.claims.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.claims.is_some()
    }

    /// Claims of the current user, or `Unauthorized` when none were attached.
    pub fn require_claims(&self) -> Result<&IdentityClaims, AppError> {
        self.claims.as_ref().ok_or_else(AppError::unauthorized)
    }
}
