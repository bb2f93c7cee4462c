//! # Projects Client SDK
//!
//! A typed Rust client for the Projects API.

use projects_types::{ErrorKind, ErrorResponse, Project};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        message: String,
        /// Error kind reported by the server, when the body carried one
        kind: Option<ErrorKind>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Projects API client.
pub struct ProjectsClient {
    base_url: String,
    http: Client,
}

impl ProjectsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Creates a project; the returned copy carries its id and creation date.
    pub async fn create_project(&self, project: &Project) -> Result<Project, ClientError> {
        let req = self.http.post(self.url("/api/projects")).json(project);
        self.send(req).await
    }

    /// Gets a project by ID.
    pub async fn get_project(&self, id: &str) -> Result<Project, ClientError> {
        let req = self.http.get(self.url(&format!("/api/projects/{}", id)));
        self.send(req).await
    }

    /// Lists one page of projects after `last_id` (first page when `None`).
    pub async fn list_projects(
        &self,
        last_id: Option<&str>,
        page_size: Option<u32>,
    ) -> Result<Vec<Project>, ClientError> {
        let req = self
            .http
            .get(self.url("/api/projects"))
            .query(&list_query(last_id, page_size));
        self.send(req).await
    }

    /// Replaces the project stored under `id`.
    pub async fn update_project(&self, id: &str, project: &Project) -> Result<Project, ClientError> {
        let req = self
            .http
            .put(self.url(&format!("/api/projects/{}", id)))
            .json(project);
        self.send(req).await
    }

    /// Deletes a project by ID.
    pub async fn delete_project(&self, id: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/api/projects/{}", id)))
            .send()
            .await?;
        if resp.status().is_success() {
            return Ok(());
        }
        Err(api_error(resp).await)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = req.send().await?;
        if resp.status().is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(api_error(resp).await)
        }
    }
}

fn list_query(last_id: Option<&str>, page_size: Option<u32>) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(id) = last_id {
        query.push(("lastProjectId", id.to_string()));
    }
    if let Some(size) = page_size {
        query.push(("pageSize", size.to_string()));
    }
    query
}

async fn api_error(resp: reqwest::Response) -> ClientError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    parse_api_error(status, body)
}

fn parse_api_error(status: u16, body: String) -> ClientError {
    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(err) => ClientError::Api {
            status,
            message: err.error,
            kind: Some(err.kind),
        },
        Err(_) => ClientError::Api {
            status,
            message: body,
            kind: None,
        },
    }
}
