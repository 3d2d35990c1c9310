use uuid::Uuid;

use crate::{
    db::models::api::error_codes,
    db::models::task::{
        CreateTaskRequest, Task, TaskDetail, TaskListQuery, TaskWithRelations, UpdateTaskRequest,
    },
    db::store::Store,
    error::{AppError, AppResult},
    services::{context::RequestContext, parse_id, projects_service::ProjectsService},
};

pub struct TasksService;

impl TasksService {
    pub fn list(
        store: &dyn Store,
        ctx: &RequestContext,
        query: TaskListQuery,
    ) -> AppResult<Vec<TaskWithRelations>> {
        let project_filter = match query.project_id.as_deref() {
            Some(raw) if !raw.is_empty() => Some(Uuid::parse_str(raw).map_err(|_| {
                AppError::invalid_field("projectId", "invalid_uuid", "projectId must be a UUID")
            })?),
            _ => None,
        };
        store.list_tasks_by_owner(ctx.user_id, project_filter)
    }

    pub fn create(
        store: &dyn Store,
        ctx: &RequestContext,
        req: CreateTaskRequest,
    ) -> AppResult<TaskWithRelations> {
        let new_task = req.into_new_task()?;
        ProjectsService::owned_by_id(store, ctx, new_task.project_id)?;
        if let Some(assignee_id) = new_task.assignee_id {
            Self::ensure_assignee(store, assignee_id)?;
        }
        let created = store.insert_task(new_task)?;
        tracing::info!(task_id = %created.task.id, project_id = %created.task.project_id, "Task created");
        Ok(created)
    }

    pub fn get(store: &dyn Store, ctx: &RequestContext, raw_id: &str) -> AppResult<TaskDetail> {
        let task = Self::owned(store, ctx, raw_id)?;
        store
            .find_task_detail(task.id)?
            .ok_or_else(|| AppError::not_found("Task"))
    }

    pub fn update(
        store: &dyn Store,
        ctx: &RequestContext,
        raw_id: &str,
        req: UpdateTaskRequest,
    ) -> AppResult<TaskWithRelations> {
        let changes = req.into_changes()?;
        let task = Self::owned(store, ctx, raw_id)?;
        if let Some(Some(assignee_id)) = changes.assignee_id {
            Self::ensure_assignee(store, assignee_id)?;
        }
        store
            .update_task_fields(task.id, changes)?
            .ok_or_else(|| AppError::not_found("Task"))
    }

    pub fn delete(store: &dyn Store, ctx: &RequestContext, raw_id: &str) -> AppResult<()> {
        let task = Self::owned(store, ctx, raw_id)?;
        if !store.delete_task_by_id(task.id)? {
            return Err(AppError::not_found("Task"));
        }
        tracing::info!(task_id = %task.id, "Task deleted");
        Ok(())
    }

    /// Resolves a task inside a project the caller owns.
    pub fn owned(store: &dyn Store, ctx: &RequestContext, raw_id: &str) -> AppResult<Task> {
        let task_id = parse_id(raw_id, "Task")?;
        let task = store
            .find_task_by_id(task_id)?
            .ok_or_else(|| AppError::not_found("Task"))?;
        match ProjectsService::owned_by_id(store, ctx, task.project_id) {
            Ok(_) => Ok(task),
            Err(AppError::NotFound { .. }) => Err(AppError::not_found("Task")),
            Err(e) => Err(e),
        }
    }

    fn ensure_assignee(store: &dyn Store, assignee_id: Uuid) -> AppResult<()> {
        match store.find_user_by_id(assignee_id)? {
            Some(_) => Ok(()),
            None => Err(AppError::invalid_field(
                "assigneeId",
                error_codes::UNKNOWN_USER,
                "Assignee does not exist",
            )),
        }
    }
}
