pub mod auth;
pub mod comments;
pub mod health;
pub mod labels;
pub mod projects;
pub mod tasks;

use crate::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route(
            "/projects",
            get(projects::get_projects).post(projects::create_project),
        )
        .route(
            "/projects/:id",
            get(projects::get_project)
                .patch(projects::update_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route(
            "/projects/:id/labels",
            get(labels::get_project_labels).post(labels::create_project_label),
        )
        .route("/tasks", get(tasks::get_tasks).post(tasks::create_task))
        .route(
            "/tasks/:id",
            get(tasks::get_task)
                .patch(tasks::update_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route(
            "/tasks/:id/comments",
            get(comments::get_comments).post(comments::create_comment),
        )
        .route(
            "/tasks/:id/labels/:label_id",
            put(labels::attach_task_label).delete(labels::detach_task_label),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes)
        .with_state(state)
}
