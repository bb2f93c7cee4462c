//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, InMemory) implement this trait.

use crate::domain::Project;
use crate::error::RepoError;

/// Persistence contract for projects.
///
/// Identifiers are passed as strings because their well-formedness is a
/// property of the store: a malformed id yields
/// `RepoError::Domain(DomainError::InvalidIdentifier)`. Every call must give up
/// with `RepoError::Timeout` once the adapter's deadline expires.
#[async_trait::async_trait]
pub trait ProjectRepository: Send + Sync + 'static {
    /// Gets a project by id. Fails with `NotFound` when absent.
    async fn get(&self, id: &str) -> Result<Project, RepoError>;

    /// Returns up to `page_size` projects whose id is greater than `last_id`,
    /// ascending by id. A blank `last_id` starts from the beginning.
    ///
    /// This is a forward-only cursor: records inserted between two calls may
    /// or may not show up on later pages.
    async fn get_all(&self, last_id: &str, page_size: u32) -> Result<Vec<Project>, RepoError>;

    /// Inserts a new project, assigning its id and `date_created`.
    /// Fails with `PreconditionFailed` if the project already has an id.
    async fn save(&self, project: Project) -> Result<Project, RepoError>;

    /// Replaces the stored project with the same id, keeping the stored
    /// `date_created` and setting `date_updated`. Fails with `NotFound` when
    /// no such record exists.
    async fn update(&self, project: Project) -> Result<Project, RepoError>;

    /// Deletes exactly one project. Fails with `NotFound` if none matched.
    async fn delete(&self, id: &str) -> Result<(), RepoError>;
}
