//! PostgreSQL repository adapter.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use projects_types::{Project, ProjectId, ProjectRepository, RepoError};

use crate::deadline::{DEFAULT_TIMEOUT, within};
use crate::document::{DbProject, ProjectDocument};
use crate::{already_persisted, missing_id, not_found};

fn db_err(e: sqlx::Error) -> RepoError {
    RepoError::Database(e.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository storing projects as JSONB documents.
pub struct PostgresRepo {
    pool: PgPool,
    timeout: Duration,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_projects_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        tracing::info!("postgres repository ready");
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
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        run_migrations(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ProjectRepository for PostgresRepo {
    async fn get(&self, id: &str) -> Result<Project, RepoError> {
        within(self.timeout, "get", async {
            let id = ProjectId::parse(id)?;

            let row: Option<DbProject> =
                sqlx::query_as(r#"SELECT id, document::text AS document FROM projects WHERE id = $1"#)
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
                r#"SELECT id, document::text AS document FROM projects
                   WHERE id > $1 ORDER BY id LIMIT $2"#,
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
            sqlx::query(r#"INSERT INTO projects (id, document) VALUES ($1, $2::jsonb)"#)
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
            let mut tx = self.pool.begin().await.map_err(db_err)?;

            // Lock the row so concurrent updates keep a single date_created.
            let stored: Option<DbProject> = sqlx::query_as(
                r#"SELECT id, document::text AS document FROM projects WHERE id = $1 FOR UPDATE"#,
            )
            .bind(id.to_hex())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?;
            let stored = stored.ok_or_else(|| not_found(id))?;

            project.date_created = stored.date_created()?;
            project.date_updated = Some(Utc::now());

            let document = ProjectDocument::from_domain(&project).to_json()?;
            sqlx::query(r#"UPDATE projects SET document = $1::jsonb WHERE id = $2"#)
                .bind(document)
                .bind(id.to_hex())
                .execute(&mut *tx)
                .await
                .map_err(db_err)?;

            tx.commit().await.map_err(db_err)?;
            Ok(project)
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        within(self.timeout, "delete", async {
            let id = ProjectId::parse(id)?;

            let result = sqlx::query(r#"DELETE FROM projects WHERE id = $1"#)
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
