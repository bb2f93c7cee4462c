//! In-memory repository adapter.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use projects_types::{Project, ProjectId, ProjectRepository, RepoError};

use crate::deadline::{DEFAULT_TIMEOUT, within};
use crate::{already_persisted, missing_id, not_found};

/// Ordered in-memory store. Iteration order is id order, which is what the
/// cursor pagination relies on.
pub struct MemoryRepo {
    projects: RwLock<BTreeMap<ProjectId, Project>>,
    timeout: Duration,
}

impl Default for MemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self {
            projects: RwLock::new(BTreeMap::new()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-call deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Number of stored projects.
    pub async fn len(&self) -> usize {
        self.projects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.projects.read().await.is_empty()
    }
}

#[async_trait]
impl ProjectRepository for MemoryRepo {
    async fn get(&self, id: &str) -> Result<Project, RepoError> {
        within(self.timeout, "get", async {
            let id = ProjectId::parse(id)?;
            self.projects
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| not_found(id))
        })
        .await
    }

    async fn get_all(&self, last_id: &str, page_size: u32) -> Result<Vec<Project>, RepoError> {
        within(self.timeout, "get_all", async {
            let lower = match ProjectId::parse_cursor(last_id)? {
                Some(cursor) => Bound::Excluded(cursor),
                None => Bound::Unbounded,
            };
            let projects = self.projects.read().await;
            Ok(projects
                .range((lower, Bound::Unbounded))
                .take(page_size as usize)
                .map(|(_, project)| project.clone())
                .collect())
        })
        .await
    }

    async fn save(&self, mut project: Project) -> Result<Project, RepoError> {
        within(self.timeout, "save", async {
            if project.id.is_some() {
                return Err(already_persisted());
            }
            let id = ProjectId::generate();
            project.id = Some(id);
            project.date_created = Some(Utc::now());

            self.projects.write().await.insert(id, project.clone());
            tracing::debug!(project_id = %id, "project saved");
            Ok(project)
        })
        .await
    }

    async fn update(&self, mut project: Project) -> Result<Project, RepoError> {
        within(self.timeout, "update", async {
            let id = project.id.ok_or_else(missing_id)?;
            let mut projects = self.projects.write().await;
            let stored = projects.get_mut(&id).ok_or_else(|| not_found(id))?;

            project.date_created = stored.date_created;
            project.date_updated = Some(Utc::now());
            *stored = project.clone();
            Ok(project)
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        within(self.timeout, "delete", async {
            let id = ProjectId::parse(id)?;
            match self.projects.write().await.remove(&id) {
                Some(_) => Ok(()),
                None => Err(not_found(id)),
            }
        })
        .await
    }
}
