//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use projects_types::{Project, ProjectId, ProjectRepository, RepoError};

use crate::deadline::{DEFAULT_TIMEOUT, within};
use crate::document::{DbProject, ProjectDocument};
use crate::{already_persisted, missing_id, not_found};

const SCHEMA: &str = include_str!("../migrations/0001_create_projects.sql");

fn db_err(e: sqlx::Error) -> RepoError {
    RepoError::Database(e.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
    timeout: Duration,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let in_memory = database_url.contains(":memory:");

        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if !in_memory {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Every in-memory connection is its own database; keep exactly one.
        let pool = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePool::connect_with(options).await?
        };

        sqlx::query(SCHEMA).execute(&pool).await?;
        tracing::info!(url = %database_url, "sqlite repository ready");

        Ok(Self {
            pool,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Overrides the per-call deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ProjectRepository for SqliteRepo {
    async fn get(&self, id: &str) -> Result<Project, RepoError> {
        within(self.timeout, "get", async {
            let id = ProjectId::parse(id)?;

            let row: Option<DbProject> =
                sqlx::query_as(r#"SELECT id, document FROM projects WHERE id = ?"#)
                    .bind(id.to_hex())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(db_err)?;

            row.ok_or_else(|| not_found(id))?.into_domain()
        })
        .await
    }

    async fn get_all(&self, last_id: &str, page_size: u32) -> Result<Vec<Project>, RepoError> {
        within(self.timeout, "get_all", async {
            let cursor = ProjectId::parse_cursor(last_id)?
                .map(|id| id.to_hex())
                .unwrap_or_default();

            let rows: Vec<DbProject> = sqlx::query_as(
                r#"SELECT id, document FROM projects WHERE id > ? ORDER BY id LIMIT ?"#,
            )
            .bind(cursor)
            .bind(i64::from(page_size))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

            rows.into_iter().map(DbProject::into_domain).collect()
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

            let document = ProjectDocument::from_domain(&project).to_json()?;
            sqlx::query(r#"INSERT INTO projects (id, document) VALUES (?, ?)"#)
                .bind(id.to_hex())
                .bind(document)
                .execute(&self.pool)
                .await
                .map_err(db_err)?;

            tracing::debug!(project_id = %id, "project saved");
            Ok(project)
        })
        .await
    }

    async fn update(&self, mut project: Project) -> Result<Project, RepoError> {
        within(self.timeout, "update", async {
            let id = project.id.ok_or_else(missing_id)?;
            project.date_created = None;
            project.date_updated = Some(Utc::now());

            // Single statement: a read-then-write transaction cannot upgrade
            // its lock while another writer holds it and fails with SQLITE_BUSY.
            let document = ProjectDocument::from_domain(&project).to_json()?;
            let rows: Vec<DbProject> = sqlx::query_as(
                r#"UPDATE projects
                   SET document = json_set(?, '$.dateCreated', json_extract(document, '$.dateCreated'))
                   WHERE id = ?
                   RETURNING id, document"#,
            )
            .bind(document)
            .bind(id.to_hex())
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

            rows.into_iter()
                .next()
                .ok_or_else(|| not_found(id))?
                .into_domain()
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        within(self.timeout, "delete", async {
            let id = ProjectId::parse(id)?;

            let result = sqlx::query(r#"DELETE FROM projects WHERE id = ?"#)
                .bind(id.to_hex())
                .execute(&self.pool)
                .await
                .map_err(db_err)?;

            if result.rows_affected() == 0 {
                return Err(not_found(id));
            }
            Ok(())
        })
        .await
    }
}
