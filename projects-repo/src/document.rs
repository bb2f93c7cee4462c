//! Row and document types shared by the SQL adapters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use projects_types::{Money, Project, ProjectId, RepoError};

/// `projects` row. Postgres selects `document::text` so both backends decode
/// into the same shape.
#[derive(FromRow)]
pub struct DbProject {
    pub id: String,
    pub document: String,
}

/// Stored body of a project. The id lives in its own column.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub name: String,
    pub unit_price: Money,
    pub time_unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<DateTime<Utc>>,
}

impl ProjectDocument {
    pub fn from_domain(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            unit_price: project.unit_price.clone(),
            time_unit: project.time_unit.clone(),
            date_created: project.date_created,
            date_updated: project.date_updated,
        }
    }

    pub fn to_json(&self) -> Result<String, RepoError> {
        serde_json::to_string(self).map_err(|e| RepoError::Database(e.to_string()))
    }

    pub fn into_domain(self, id: ProjectId) -> Project {
        Project {
            id: Some(id),
            name: self.name,
            unit_price: self.unit_price,
            time_unit: self.time_unit,
            date_created: self.date_created,
            date_updated: self.date_updated,
        }
    }
}

impl DbProject {
    pub fn into_domain(self) -> Result<Project, RepoError> {
        let id = ProjectId::parse(&self.id)?;
        let document: ProjectDocument = serde_json::from_str(&self.document)
            .map_err(|e| RepoError::Database(format!("corrupt project {}: {}", self.id, e)))?;
        Ok(document.into_domain(id))
    }

    /// `date_created` of the stored document, if any.
    #[cfg(feature = "postgres")]
    pub fn date_created(&self) -> Result<Option<DateTime<Utc>>, RepoError> {
        let document: ProjectDocument = serde_json::from_str(&self.document)
            .map_err(|e| RepoError::Database(format!("corrupt project {}: {}", self.id, e)))?;
        Ok(document.date_created)
    }
}
