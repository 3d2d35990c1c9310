use uuid::Uuid;

use crate::{
    db::models::project::{
        CreateProjectRequest, Project, ProjectDetail, ProjectWithOwner, UpdateProjectRequest,
    },
    db::store::Store,
    error::{AppError, AppResult},
    services::{context::RequestContext, parse_id},
};

pub struct ProjectsService;

impl ProjectsService {
    pub fn list(store: &dyn Store, ctx: &RequestContext) -> AppResult<Vec<ProjectDetail>> {
        store.list_projects_by_owner(ctx.user_id)
    }

    pub fn create(
        store: &dyn Store,
        ctx: &RequestContext,
        req: CreateProjectRequest,
    ) -> AppResult<ProjectWithOwner> {
        let new_project = req.into_new_project(ctx.user_id)?;
        let created = store.insert_project(new_project)?;
        tracing::info!(project_id = %created.project.id, owner_id = %ctx.user_id, "Project created");
        Ok(created)
    }

    pub fn get(store: &dyn Store, ctx: &RequestContext, raw_id: &str) -> AppResult<ProjectDetail> {
        let project = Self::owned(store, ctx, raw_id)?;
        store
            .find_project_detail(project.id)?
            .ok_or_else(|| AppError::not_found("Project"))
    }

    pub fn update(
        store: &dyn Store,
        ctx: &RequestContext,
        raw_id: &str,
        req: UpdateProjectRequest,
    ) -> AppResult<ProjectWithOwner> {
        let changes = req.into_changes()?;
        let project = Self::owned(store, ctx, raw_id)?;
        store
            .update_project_fields(project.id, changes)?
            .ok_or_else(|| AppError::not_found("Project"))
    }

    pub fn delete(store: &dyn Store, ctx: &RequestContext, raw_id: &str) -> AppResult<()> {
        let project = Self::owned(store, ctx, raw_id)?;
        if !store.delete_project_by_id(project.id)? {
            return Err(AppError::not_found("Project"));
        }
        tracing::info!(project_id = %project.id, "Project deleted");
        Ok(())
    }

    /// Resolves a project the caller owns. Foreign and missing projects are
    /// indistinguishable.
    pub fn owned(store: &dyn Store, ctx: &RequestContext, raw_id: &str) -> AppResult<Project> {
        let project_id = parse_id(raw_id, "Project")?;
        Self::owned_by_id(store, ctx, project_id)
    }

    pub fn owned_by_id(
        store: &dyn Store,
        ctx: &RequestContext,
        project_id: Uuid,
    ) -> AppResult<Project> {
        store
            .find_project_by_id(project_id)?
            .filter(|project| project.owner_id == ctx.user_id)
            .ok_or_else(|| AppError::not_found("Project"))
    }
}
