pub mod auth_service;
pub mod comments_service;
pub mod context;
pub mod labels_service;
pub mod projects_service;
pub mod tasks_service;

pub use auth_service::AuthService;
pub use comments_service::CommentsService;
pub use context::RequestContext;
pub use labels_service::LabelsService;
pub use projects_service::ProjectsService;
pub use tasks_service::TasksService;

use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Path ids that are not UUIDs can never match a row.
pub(crate) fn parse_id(raw: &str, resource: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found(resource))
}
