use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use crate::{
    AppState,
    db::{
        models::user::{LoginRequest, LoginResponse, RegisterRequest, User},
        run_blocking,
    },
    error::AppResult,
    middleware::SessionUser,
    services::AuthService,
    validation::ValidatedJson,
};

pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let store = state.store.clone();
    let cost = state.config.bcrypt_cost;
    let user = run_blocking(move || AuthService::register(store.as_ref(), payload, cost)).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let store = state.store.clone();
    let tokens = state.tokens.clone();
    let response =
        run_blocking(move || AuthService::login(store.as_ref(), &tokens, payload)).await?;
    Ok(Json(response))
}

pub async fn me(SessionUser(user): SessionUser) -> Json<User> {
    Json(user)
}
