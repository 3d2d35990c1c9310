use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use crate::{
    AppState,
    db::{
        models::{
            api::Acknowledgement,
            label::{CreateLabelRequest, Label},
        },
        run_blocking,
    },
    error::AppResult,
    middleware::SessionUser,
    services::{LabelsService, RequestContext},
    validation::ValidatedJson,
};

pub async fn get_project_labels(
    State(state): State<Arc<AppState>>,
    session: SessionUser,
    Path(project_id): Path<String>,
) -> AppResult<Json<Vec<Label>>> {
    let ctx = RequestContext::from(&session);
    let store = state.store.clone();
    let labels =
        run_blocking(move || LabelsService::list(store.as_ref(), &ctx, &project_id)).await?;
    Ok(Json(labels))
}

pub async fn create_project_label(
    State(state): State<Arc<AppState>>,
    session: SessionUser,
    Path(project_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<CreateLabelRequest>,
) -> AppResult<(StatusCode, Json<Label>)> {
    let ctx = RequestContext::from(&session);
    let store = state.store.clone();
    let label = run_blocking(move || {
        LabelsService::create(store.as_ref(), &ctx, &project_id, payload)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(label)))
}

pub async fn attach_task_label(
    State(state): State<Arc<AppState>>,
    session: SessionUser,
    Path((task_id, label_id)): Path<(String, String)>,
) -> AppResult<Json<Acknowledgement>> {
    let ctx = RequestContext::from(&session);
    let store = state.store.clone();
    run_blocking(move || LabelsService::attach(store.as_ref(), &ctx, &task_id, &label_id))
        .await?;
    Ok(Json(Acknowledgement::ok()))
}

pub async fn detach_task_label(
    State(state): State<Arc<AppState>>,
    session: SessionUser,
    Path((task_id, label_id)): Path<(String, String)>,
) -> AppResult<Json<Acknowledgement>> {
    let ctx = RequestContext::from(&session);
    let store = state.store.clone();
    run_blocking(move || LabelsService::detach(store.as_ref(), &ctx, &task_id, &label_id))
        .await?;
    Ok(Json(Acknowledgement::ok()))
}
