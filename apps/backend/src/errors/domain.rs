//! Errors raised by the user and follow stores and the session services.
//!
//! Repos report uniqueness clashes and missing rows here without knowing
//! about HTTP. Routes turn them into problem responses through `AppError`.

use thiserror::Error;

/// Store-side failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// What could not be found
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    User,
    Profile,
    Other(String),
}

/// Which uniqueness rule was violated
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    UniqueEmail,
    UniqueUsername,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Rejected input, such as an empty username
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("{0:?} conflict: {1}")]
    Conflict(ConflictKind, String),
    #[error("{0:?} missing: {1}")]
    NotFound(NotFoundKind, String),
    /// Database failures, classified by `infra::db_errors`
    #[error("store failure ({0:?}): {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
}
