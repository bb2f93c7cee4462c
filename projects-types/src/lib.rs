//! # Projects Types
//!
//! Domain types and port traits for the projects service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Money, Currency, Project, ProjectId)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain, repository and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{Currency, CurrencyInfo, Money, Project, ProjectId, TimeUnit};
pub use dto::*;
pub use error::{AppError, DomainError, ErrorKind, RepoError};
pub use ports::ProjectRepository;
