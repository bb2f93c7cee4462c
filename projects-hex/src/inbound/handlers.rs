//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use projects_types::{
    AppError, DEFAULT_PAGE_SIZE, ErrorResponse, HealthResponse, ListProjectsQuery, Project,
    ProjectId, ProjectRepository,
};

use crate::ProjectService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<R: ProjectRepository> {
    pub service: ProjectService<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AppError::ConstraintViolation(_)
            | AppError::InvalidIdentifier(_)
            | AppError::CurrencyMismatch(_)
            | AppError::InvalidRatio(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PreconditionFailed(_) => StatusCode::PRECONDITION_FAILED,
            AppError::Internal(_) | AppError::Timeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.0.to_string(),
            kind: self.0.kind(),
            code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request parsing
// ─────────────────────────────────────────────────────────────────────────────

/// Decodes a project body. An empty body or a JSON `null` is a project that
/// was never instantiated.
fn parse_project(body: &Bytes) -> Result<Project, AppError> {
    let project = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        serde_json::from_slice::<Option<Project>>(body).map_err(|e| {
            AppError::ConstraintViolation(format!("The Project could not be read: {}", e))
        })?
    };
    Ok(Project::require(project)?)
}

fn require_path_id(id: &str) -> Result<&str, AppError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::ConstraintViolation(
            "The Project ID is missing".into(),
        ));
    }
    Ok(id)
}

fn parse_page_size(raw: Option<&str>) -> Result<u32, AppError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(DEFAULT_PAGE_SIZE),
        Some(raw) => raw,
    };
    match raw.parse::<u32>() {
        Ok(size) if size >= 1 => Ok(size),
        _ => Err(AppError::ConstraintViolation(format!(
            "pageSize must be a positive integer, got {:?}",
            raw
        ))),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".into(),
    })
}

/// OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

#[tracing::instrument(skip(state, body))]
pub async fn create_project<R: ProjectRepository>(
    State(state): State<Arc<AppState<R>>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let project = parse_project(&body)?;
    let created = state.service.create.execute(project).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List one page of projects.
#[tracing::instrument(skip(state))]
pub async fn list_projects<R: ProjectRepository>(
    State(state): State<Arc<AppState<R>>>,
    Query(query): Query<ListProjectsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page_size = parse_page_size(query.page_size.as_deref())?;
    let last_id = query.last_project_id.as_deref().unwrap_or_default();

    let projects = state.service.list.execute(last_id, page_size).await?;
    Ok(Json(projects))
}

/// Get project by ID.
#[tracing::instrument(skip(state), fields(project_id = %id))]
pub async fn get_project<R: ProjectRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = require_path_id(&id)?;
    let project = state.service.get.execute(id).await?;
    Ok(Json(project))
}

/// Replace a project. The body's id, when present, must match the path.
#[tracing::instrument(skip(state, body), fields(project_id = %id))]
pub async fn update_project<R: ProjectRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let mut project = parse_project(&body)?;
    let path_id = ProjectId::parse(require_path_id(&id)?).map_err(AppError::from)?;

    match project.id {
        Some(body_id) if body_id != path_id => {
            return Err(AppError::ConstraintViolation(format!(
                "The Project ID in the path ({}) does not match the one in the body ({})",
                path_id, body_id
            ))
            .into());
        }
        Some(_) => {}
        None => project.id = Some(path_id),
    }

    let updated = state.service.update.execute(project).await?;
    Ok(Json(updated))
}

/// Delete a project.
#[tracing::instrument(skip(state), fields(project_id = %id))]
pub async fn delete_project<R: ProjectRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = require_path_id(&id)?;
    state.service.delete.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
