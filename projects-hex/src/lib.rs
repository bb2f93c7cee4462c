//! # Projects Hex
//!
//! Use cases and HTTP adapter for the projects service.
//!
//! ## Architecture
//!
//! - `service/` - One use case per operation, bundled in [`ProjectService`]
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - OpenAPI document served by the HTTP adapter
//!
//! Every use case is generic over `R: ProjectRepository`, allowing
//! different repository implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::{
    CreateProject, DeleteProject, GetProject, ListProjects, ProjectService, UpdateProject,
};
