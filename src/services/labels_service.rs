use crate::{
    db::models::api::error_codes,
    db::models::label::{CreateLabelRequest, Label, NewLabel},
    db::store::Store,
    error::{AppError, AppResult},
    services::{
        context::RequestContext, parse_id, projects_service::ProjectsService,
        tasks_service::TasksService,
    },
};

pub struct LabelsService;

impl LabelsService {
    pub fn list(
        store: &dyn Store,
        ctx: &RequestContext,
        raw_project_id: &str,
    ) -> AppResult<Vec<Label>> {
        let project = ProjectsService::owned(store, ctx, raw_project_id)?;
        store.list_labels_by_project(project.id)
    }

    pub fn create(
        store: &dyn Store,
        ctx: &RequestContext,
        raw_project_id: &str,
        req: CreateLabelRequest,
    ) -> AppResult<Label> {
        let project = ProjectsService::owned(store, ctx, raw_project_id)?;
        store.insert_label(NewLabel::new(project.id, req.name, req.color))
    }

    pub fn attach(
        store: &dyn Store,
        ctx: &RequestContext,
        raw_task_id: &str,
        raw_label_id: &str,
    ) -> AppResult<()> {
        let task = TasksService::owned(store, ctx, raw_task_id)?;
        let label_id = parse_id(raw_label_id, "Label")?;
        let label = store
            .find_label_by_id(label_id)?
            .ok_or_else(|| AppError::not_found("Label"))?;
        if label.project_id != task.project_id {
            return Err(AppError::invalid_field(
                "labelId",
                error_codes::LABEL_PROJECT_MISMATCH,
                "Label belongs to a different project",
            ));
        }
        store.attach_label(task.id, label.id)
    }

    pub fn detach(
        store: &dyn Store,
        ctx: &RequestContext,
        raw_task_id: &str,
        raw_label_id: &str,
    ) -> AppResult<()> {
        let task = TasksService::owned(store, ctx, raw_task_id)?;
        let label_id = parse_id(raw_label_id, "Label")?;
        if !store.detach_label(task.id, label_id)? {
            return Err(AppError::not_found("Label"));
        }
        Ok(())
    }
}
