//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use projects_types::domain::Money;
use projects_types::dto::{ErrorResponse, HealthResponse, ListProjectsQuery};
use projects_types::{ErrorKind, Project};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse, example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Create a new project
#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "projects",
    request_body = Project,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, description = "Missing, malformed or invalid project", body = ErrorResponse),
        (status = 412, description = "Project already carries an id", body = ErrorResponse)
    )
)]
async fn create_project() {}

/// List projects, one page at a time, in id order
#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "projects",
    params(ListProjectsQuery),
    responses(
        (status = 200, description = "One page of projects", body = Vec<Project>),
        (status = 400, description = "Invalid cursor or page size", body = ErrorResponse)
    )
)]
async fn list_projects() {}

/// Get a project by ID
#[utoipa::path(
    get,
    path = "/api/projects/{projectId}",
    tag = "projects",
    params(
        ("projectId" = String, Path, description = "Project ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Project found", body = Project),
        (status = 400, description = "Invalid project ID", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
async fn get_project() {}

/// Replace a project
#[utoipa::path(
    put,
    path = "/api/projects/{projectId}",
    tag = "projects",
    params(
        ("projectId" = String, Path, description = "Project ID (24 hex characters)")
    ),
    request_body = Project,
    responses(
        (status = 200, description = "Project updated", body = Project),
        (status = 400, description = "Invalid project or ID mismatch", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
async fn update_project() {}

/// Delete a project
#[utoipa::path(
    delete,
    path = "/api/projects/{projectId}",
    tag = "projects",
    params(
        ("projectId" = String, Path, description = "Project ID (24 hex characters)")
    ),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 400, description = "Invalid project ID", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
async fn delete_project() {}

/// OpenAPI documentation for the Projects API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Projects API",
        version = "1.0.0",
        description = "Billable projects with a unit price and a billing time unit.\n\nLists are paginated with a forward-only cursor: pass the id of the last project of a page as `lastProjectId` to get the next one.",
        license(name = "MIT"),
    ),
    paths(
        health,
        create_project,
        list_projects,
        get_project,
        update_project,
        delete_project,
    ),
    components(
        schemas(
            Project,
            Money,
            ErrorResponse,
            ErrorKind,
            HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "projects", description = "Project management operations"),
    )
)]
pub struct ApiDoc;
