//! Error types for the projects service.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Currency;

/// Identifiable error kinds surfaced across the use-case boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ErrorKind {
    ConstraintViolation,
    InvalidIdentifier,
    NotFound,
    PreconditionFailed,
    CurrencyMismatch,
    InvalidRatio,
    InternalError,
    Timeout,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Domain-level errors (business rule violations).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: Currency, got: Currency },

    #[error("Invalid ratio: {0}")]
    InvalidRatio(String),

    #[error("{0}")]
    ConstraintViolation(String),

    #[error("Invalid Project ID format: {0}")]
    InvalidIdentifier(String),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::CurrencyMismatch { .. } => ErrorKind::CurrencyMismatch,
            DomainError::InvalidRatio(_) => ErrorKind::InvalidRatio,
            DomainError::ConstraintViolation(_) => ErrorKind::ConstraintViolation,
            DomainError::InvalidIdentifier(_) => ErrorKind::InvalidIdentifier,
        }
    }
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Repository operation `{operation}` timed out after {limit:?}")]
    Timeout {
        operation: &'static str,
        limit: Duration,
    },
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepoError::Domain(e) => e.kind(),
            RepoError::Database(_) => ErrorKind::InternalError,
            RepoError::NotFound(_) => ErrorKind::NotFound,
            RepoError::PreconditionFailed(_) => ErrorKind::PreconditionFailed,
            RepoError::Timeout { .. } => ErrorKind::Timeout,
        }
    }
}

/// Application-level errors returned by the use cases.
///
/// One variant per [`ErrorKind`]; converting from the lower layers never
/// changes the kind, it only flattens the message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    ConstraintViolation(String),

    #[error("{0}")]
    InvalidIdentifier(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PreconditionFailed(String),

    #[error("{0}")]
    CurrencyMismatch(String),

    #[error("{0}")]
    InvalidRatio(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Timeout: {0}")]
    Timeout(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::ConstraintViolation(_) => ErrorKind::ConstraintViolation,
            AppError::InvalidIdentifier(_) => ErrorKind::InvalidIdentifier,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::PreconditionFailed(_) => ErrorKind::PreconditionFailed,
            AppError::CurrencyMismatch(_) => ErrorKind::CurrencyMismatch,
            AppError::InvalidRatio(_) => ErrorKind::InvalidRatio,
            AppError::Internal(_) => ErrorKind::InternalError,
            AppError::Timeout(_) => ErrorKind::Timeout,
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let msg = err.to_string();
        match err {
            DomainError::CurrencyMismatch { .. } => AppError::CurrencyMismatch(msg),
            DomainError::InvalidRatio(_) => AppError::InvalidRatio(msg),
            DomainError::ConstraintViolation(_) => AppError::ConstraintViolation(msg),
            DomainError::InvalidIdentifier(_) => AppError::InvalidIdentifier(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => e.into(),
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::NotFound(e) => AppError::NotFound(e),
            RepoError::PreconditionFailed(e) => AppError::PreconditionFailed(e),
            e @ RepoError::Timeout { .. } => AppError::Timeout(e.to_string()),
        }
    }
}
