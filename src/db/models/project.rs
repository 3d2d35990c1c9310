use crate::db::enums::ProjectStatus;
use crate::error::AppResult;
use crate::validation::rules::{parse_enum, validate_project_status};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::task::Task;
use super::user::UserSummary;

// Project models
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::projects)]
pub struct NewProject {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewProject {
    pub fn new(
        owner_id: Uuid,
        name: String,
        description: Option<String>,
        status: ProjectStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            status,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; `None` leaves the column untouched.
#[derive(AsChangeset, Clone, Debug)]
#[diesel(table_name = crate::schema::projects)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct ProjectWithOwner {
    #[serde(flatten)]
    pub project: Project,
    pub owner: UserSummary,
}

#[derive(Serialize, Clone, Debug)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub owner: UserSummary,
    pub tasks: Vec<Task>,
}

// Project API DTOs
#[derive(Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Project name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "crate::validation::rules::non_null")]
    pub description: Option<String>,
    #[validate(custom(function = "validate_project_status"))]
    #[serde(default, deserialize_with = "crate::validation::rules::non_null")]
    pub status: Option<String>,
}

impl CreateProjectRequest {
    pub fn into_new_project(self, owner_id: Uuid) -> AppResult<NewProject> {
        let status = match self.status {
            Some(raw) => parse_enum::<ProjectStatus>("status", &raw)?,
            None => ProjectStatus::default(),
        };
        Ok(NewProject::new(owner_id, self.name, self.description, status))
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 255, message = "Project name cannot be empty"))]
    #[serde(default, deserialize_with = "crate::validation::rules::non_null")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::validation::rules::non_null")]
    pub description: Option<String>,
    #[validate(custom(function = "validate_project_status"))]
    #[serde(default, deserialize_with = "crate::validation::rules::non_null")]
    pub status: Option<String>,
}

impl UpdateProjectRequest {
    pub fn into_changes(self) -> AppResult<ProjectChanges> {
        let status = self
            .status
            .map(|raw| parse_enum::<ProjectStatus>("status", &raw))
            .transpose()?;
        Ok(ProjectChanges {
            name: self.name,
            description: self.description,
            status,
            updated_at: Utc::now(),
        })
    }
}
