use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use crate::{
    AppState,
    db::{
        models::{
            api::Acknowledgement,
            task::{CreateTaskRequest, TaskDetail, TaskListQuery, TaskWithRelations, UpdateTaskRequest},
        },
        run_blocking,
    },
    error::AppResult,
    middleware::SessionUser,
    services::{RequestContext, TasksService},
    validation::ValidatedJson,
};

pub async fn get_tasks(
    State(state): State<Arc<AppState>>,
    session: SessionUser,
    Query(query): Query<TaskListQuery>,
) -> AppResult<Json<Vec<TaskWithRelations>>> {
    let ctx = RequestContext::from(&session);
    let store = state.store.clone();
    let tasks = run_blocking(move || TasksService::list(store.as_ref(), &ctx, query)).await?;
    Ok(Json(tasks))
}

pub async fn create_task(
    State(state): State<Arc<AppState>>,
    session: SessionUser,
    ValidatedJson(payload): ValidatedJson<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<TaskWithRelations>)> {
    let ctx = RequestContext::from(&session);
    let store = state.store.clone();
    let created = run_blocking(move || TasksService::create(store.as_ref(), &ctx, payload)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_task(
    State(state): State<Arc<AppState>>,
    session: SessionUser,
    Path(task_id): Path<String>,
) -> AppResult<Json<TaskDetail>> {
    let ctx = RequestContext::from(&session);
    let store = state.store.clone();
    let task = run_blocking(move || TasksService::get(store.as_ref(), &ctx, &task_id)).await?;
    Ok(Json(task))
}

pub async fn update_task(
    State(state): State<Arc<AppState>>,
    session: SessionUser,
    Path(task_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateTaskRequest>,
) -> AppResult<Json<TaskWithRelations>> {
    let ctx = RequestContext::from(&session);
    let store = state.store.clone();
    let updated =
        run_blocking(move || TasksService::update(store.as_ref(), &ctx, &task_id, payload))
            .await?;
    Ok(Json(updated))
}

pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    session: SessionUser,
    Path(task_id): Path<String>,
) -> AppResult<Json<Acknowledgement>> {
    let ctx = RequestContext::from(&session);
    let store = state.store.clone();
    run_blocking(move || TasksService::delete(store.as_ref(), &ctx, &task_id)).await?;
    Ok(Json(Acknowledgement::ok()))
}
