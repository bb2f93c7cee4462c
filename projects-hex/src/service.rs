//! Project use cases.
//!
//! Orchestrate domain rules through the repository port.
//! Contain NO infrastructure logic - pure business orchestration.

use std::sync::Arc;

use projects_types::{AppError, Project, ProjectRepository};

/// Logs a failed repository call and converts it to the use-case error.
/// The kind is never changed here.
fn surface(operation: &'static str, err: projects_types::RepoError) -> AppError {
    let err = AppError::from(err);
    match err {
        AppError::Internal(_) | AppError::Timeout(_) => {
            tracing::error!(operation, error = %err, "project operation failed");
        }
        _ => tracing::debug!(operation, error = %err, "project operation rejected"),
    }
    err
}

// ─────────────────────────────────────────────────────────────────────────────
// Use cases
// ─────────────────────────────────────────────────────────────────────────────

/// Validates and stores a new project.
pub struct CreateProject<R: ProjectRepository> {
    repo: Arc<R>,
}

impl<R: ProjectRepository> CreateProject<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Invalid projects are rejected before the repository is touched.
    pub async fn execute(&self, project: Project) -> Result<Project, AppError> {
        project.validate()?;
        let saved = self
            .repo
            .save(project)
            .await
            .map_err(|e| surface("create", e))?;
        tracing::info!(project_id = ?saved.id, "project created");
        Ok(saved)
    }
}

pub struct GetProject<R: ProjectRepository> {
    repo: Arc<R>,
}

impl<R: ProjectRepository> GetProject<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: &str) -> Result<Project, AppError> {
        self.repo.get(id).await.map_err(|e| surface("get", e))
    }
}

/// One page of projects, in identifier order.
pub struct ListProjects<R: ProjectRepository> {
    repo: Arc<R>,
}

impl<R: ProjectRepository> ListProjects<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// `last_project_id` is the last id of the previous page, blank for the
    /// first one.
    pub async fn execute(
        &self,
        last_project_id: &str,
        page_size: u32,
    ) -> Result<Vec<Project>, AppError> {
        self.repo
            .get_all(last_project_id, page_size)
            .await
            .map_err(|e| surface("list", e))
    }
}

pub struct UpdateProject<R: ProjectRepository> {
    repo: Arc<R>,
}

impl<R: ProjectRepository> UpdateProject<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Replaces a stored project. The stored creation date is kept.
    pub async fn execute(&self, project: Project) -> Result<Project, AppError> {
        project.validate()?;
        let updated = self
            .repo
            .update(project)
            .await
            .map_err(|e| surface("update", e))?;
        tracing::info!(project_id = ?updated.id, "project updated");
        Ok(updated)
    }
}

pub struct DeleteProject<R: ProjectRepository> {
    repo: Arc<R>,
}

impl<R: ProjectRepository> DeleteProject<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: &str) -> Result<(), AppError> {
        self.repo.delete(id).await.map_err(|e| surface("delete", e))?;
        tracing::info!(project_id = %id, "project deleted");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Service bundle
// ─────────────────────────────────────────────────────────────────────────────

/// The five project use cases, sharing one repository.
///
/// Generic over `R: ProjectRepository` - the adapter is injected at compile time.
/// This enables:
/// - Swapping repositories without code changes
/// - Testing with in-memory repo
/// - Compile-time checks for port implementation
pub struct ProjectService<R: ProjectRepository> {
    pub create: CreateProject<R>,
    pub get: GetProject<R>,
    pub list: ListProjects<R>,
    pub update: UpdateProject<R>,
    pub delete: DeleteProject<R>,
    repo: Arc<R>,
}

impl<R: ProjectRepository> ProjectService<R> {
    /// Creates the use cases over the given repository.
    pub fn new(repo: R) -> Self {
        Self::from_shared(Arc::new(repo))
    }

    pub fn from_shared(repo: Arc<R>) -> Self {
        Self {
            create: CreateProject::new(repo.clone()),
            get: GetProject::new(repo.clone()),
            list: ListProjects::new(repo.clone()),
            update: UpdateProject::new(repo.clone()),
            delete: DeleteProject::new(repo.clone()),
            repo,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }
}
