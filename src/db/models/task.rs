use crate::db::enums::{TaskPriority, TaskStatus};
use crate::error::{AppError, AppResult};
use crate::validation::rules::{parse_enum, validate_task_priority, validate_task_status};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::comment::CommentWithAuthor;
use super::label::Label;
use super::project::{Project, ProjectSummary};
use super::user::UserSummary;

// Task models
#[derive(
    Queryable, Selectable, Identifiable, Associations, Serialize, Deserialize, Clone, Debug, PartialEq,
)]
#[diesel(belongs_to(Project))]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub project_id: Uuid,
    pub assignee_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::tasks)]
pub struct NewTask {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub project_id: Uuid,
    pub assignee_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update. `assignee_id`: `None` keeps the assignee, `Some(None)`
/// clears it.
#[derive(AsChangeset, Clone, Debug)]
#[diesel(table_name = crate::schema::tasks)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assignee_id: Option<Option<Uuid>>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Clone, Debug)]
pub struct TaskWithRelations {
    #[serde(flatten)]
    pub task: Task,
    pub assignee: Option<UserSummary>,
    pub project: ProjectSummary,
}

#[derive(Serialize, Clone, Debug)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: Task,
    pub assignee: Option<UserSummary>,
    pub project: ProjectSummary,
    pub comments: Vec<CommentWithAuthor>,
    pub labels: Vec<Label>,
}

// Task API DTOs
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Task title is required"))]
    pub title: String,
    #[serde(default, deserialize_with = "crate::validation::rules::non_null")]
    pub description: Option<String>,
    #[validate(custom(function = "validate_task_status"))]
    #[serde(default, deserialize_with = "crate::validation::rules::non_null")]
    pub status: Option<String>,
    #[validate(custom(function = "validate_task_priority"))]
    #[serde(default, deserialize_with = "crate::validation::rules::non_null")]
    pub priority: Option<String>,
    #[validate(required(message = "projectId is required"))]
    pub project_id: Option<Uuid>,
    pub assignee_id: Option<Uuid>,
}

impl CreateTaskRequest {
    pub fn into_new_task(self) -> AppResult<NewTask> {
        let project_id = self
            .project_id
            .ok_or_else(|| AppError::invalid_field("projectId", "required", "projectId is required"))?;
        let status = match self.status {
            Some(raw) => parse_enum::<TaskStatus>("status", &raw)?,
            None => TaskStatus::default(),
        };
        let priority = match self.priority {
            Some(raw) => parse_enum::<TaskPriority>("priority", &raw)?,
            None => TaskPriority::default(),
        };
        let now = Utc::now();
        Ok(NewTask {
            id: Uuid::new_v4(),
            title: self.title,
            description: self.description,
            status,
            priority,
            project_id,
            assignee_id: self.assignee_id,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 255, message = "Task title cannot be empty"))]
    #[serde(default, deserialize_with = "crate::validation::rules::non_null")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::validation::rules::non_null")]
    pub description: Option<String>,
    #[validate(custom(function = "validate_task_status"))]
    #[serde(default, deserialize_with = "crate::validation::rules::non_null")]
    pub status: Option<String>,
    #[validate(custom(function = "validate_task_priority"))]
    #[serde(default, deserialize_with = "crate::validation::rules::non_null")]
    pub priority: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub assignee_id: Option<Option<Uuid>>,
}

impl UpdateTaskRequest {
    pub fn into_changes(self) -> AppResult<TaskChanges> {
        let status = self
            .status
            .map(|raw| parse_enum::<TaskStatus>("status", &raw))
            .transpose()?;
        let priority = self
            .priority
            .map(|raw| parse_enum::<TaskPriority>("priority", &raw))
            .transpose()?;
        Ok(TaskChanges {
            title: self.title,
            description: self.description,
            status,
            priority,
            assignee_id: self.assignee_id,
            updated_at: Utc::now(),
        })
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct TaskListQuery {
    #[serde(rename = "projectId", alias = "project_id")]
    pub project_id: Option<String>,
}
