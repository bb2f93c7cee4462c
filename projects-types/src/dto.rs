//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::ErrorKind;

/// Page size applied when a list request does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Query string of the project list endpoint.
///
/// Both values are kept as raw strings so the HTTP boundary can report
/// malformed input as a constraint violation instead of a generic rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListProjectsQuery {
    /// Id of the last project of the previous page; empty for the first page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_project_id: Option<String>,
    /// Maximum number of projects to return (default 20)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<String>,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    pub kind: ErrorKind,
    /// HTTP status code
    #[schema(example = 404)]
    pub code: u16,
}

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
}
