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
            project::{CreateProjectRequest, ProjectDetail, ProjectWithOwner, UpdateProjectRequest},
        },
        run_blocking,
    },
    error::AppResult,
    middleware::SessionUser,
    services::{ProjectsService, RequestContext},
    validation::ValidatedJson,
};

pub async fn get_projects(
    State(state): State<Arc<AppState>>,
    session: SessionUser,
) -> AppResult<Json<Vec<ProjectDetail>>> {
    let ctx = RequestContext::from(&session);
    let store = state.store.clone();
    let projects = run_blocking(move || ProjectsService::list(store.as_ref(), &ctx)).await?;
    Ok(Json(projects))
}

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    session: SessionUser,
    ValidatedJson(payload): ValidatedJson<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<ProjectWithOwner>)> {
    let ctx = RequestContext::from(&session);
    let store = state.store.clone();
    let created =
        run_blocking(move || ProjectsService::create(store.as_ref(), &ctx, payload)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_project(
    State(state): State<Arc<AppState>>,
    session: SessionUser,
    Path(project_id): Path<String>,
) -> AppResult<Json<ProjectDetail>> {
    let ctx = RequestContext::from(&session);
    let store = state.store.clone();
    let project =
        run_blocking(move || ProjectsService::get(store.as_ref(), &ctx, &project_id)).await?;
    Ok(Json(project))
}

pub async fn update_project(
    State(state): State<Arc<AppState>>,
    session: SessionUser,
    Path(project_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateProjectRequest>,
) -> AppResult<Json<ProjectWithOwner>> {
    let ctx = RequestContext::from(&session);
    let store = state.store.clone();
    let updated = run_blocking(move || {
        ProjectsService::update(store.as_ref(), &ctx, &project_id, payload)
    })
    .await?;
    Ok(Json(updated))
}

pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    session: SessionUser,
    Path(project_id): Path<String>,
) -> AppResult<Json<Acknowledgement>> {
    let ctx = RequestContext::from(&session);
    let store = state.store.clone();
    run_blocking(move || ProjectsService::delete(store.as_ref(), &ctx, &project_id)).await?;
    Ok(Json(Acknowledgement::ok()))
}
