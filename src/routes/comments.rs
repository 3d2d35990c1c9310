use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use crate::{
    AppState,
    db::{
        models::comment::{CommentWithAuthor, CreateCommentRequest},
        run_blocking,
    },
    error::AppResult,
    middleware::SessionUser,
    services::{CommentsService, RequestContext},
    validation::ValidatedJson,
};

pub async fn get_comments(
    State(state): State<Arc<AppState>>,
    session: SessionUser,
    Path(task_id): Path<String>,
) -> AppResult<Json<Vec<CommentWithAuthor>>> {
    let ctx = RequestContext::from(&session);
    let store = state.store.clone();
    let comments =
        run_blocking(move || CommentsService::list(store.as_ref(), &ctx, &task_id)).await?;
    Ok(Json(comments))
}

pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    session: SessionUser,
    Path(task_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<CommentWithAuthor>)> {
    let ctx = RequestContext::from(&session);
    let store = state.store.clone();
    let created = run_blocking(move || {
        CommentsService::create(store.as_ref(), &ctx, &task_id, payload)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}
