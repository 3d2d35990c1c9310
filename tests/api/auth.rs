use axum::http::{Method, StatusCode};
use serde_json::json;

use super::{TestApp, assert_error, error_fields};

#[tokio::test]
async fn register_returns_user_without_password_hash() {
    let app = TestApp::new();
    let (status, user) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "email": "ada@example.com", "password": "secret1", "name": "Ada" })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["email"], json!("ada@example.com"));
    assert_eq!(user["role"], json!("MEMBER"));
    assert!(user.get("passwordHash").is_none());
    assert!(user.get("password_hash").is_none());
    assert!(user["createdAt"].is_string());
}

#[tokio::test]
async fn register_reports_every_invalid_field() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "email": "not-an-email", "password": "123", "role": "OWNER" })),
        )
        .await;

    assert_error(status, &body, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["email", "name", "password", "role"]);
    assert_eq!(app.store.count_users().unwrap(), 0);
}

#[tokio::test]
async fn register_rejects_taken_email() {
    let app = TestApp::new();
    app.signup("dup@example.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "email": "DUP@example.com", "password": "secret1", "name": "Again" })),
        )
        .await;

    assert_error(status, &body, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], json!("email"));
    assert_eq!(body["errors"][0]["code"], json!("email_taken"));
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.signup("login@example.com").await;

    let (status, wrong_password) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "login@example.com", "password": "wrong" })),
        )
        .await;
    assert_error(status, &wrong_password, StatusCode::UNAUTHORIZED);

    let (status, unknown) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "ghost@example.com", "password": "password1" })),
        )
        .await;
    assert_error(status, &unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password["error"], unknown["error"]);
}

#[tokio::test]
async fn login_returns_bearer_token() {
    let app = TestApp::new();
    app.signup("token@example.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "token@example.com", "password": "password1" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tokenType"], json!("bearer"));
    assert_eq!(body["expiresIn"], json!(1800));
    assert_eq!(body["user"]["email"], json!("token@example.com"));
}

#[tokio::test]
async fn me_resolves_the_session_user() {
    let app = TestApp::new();
    let session = app.signup("me@example.com").await;

    let (status, body) = app
        .send(Method::GET, "/api/auth/me", Some(&session.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(session.user_id));
}

#[tokio::test]
async fn garbage_and_foreign_tokens_are_unauthorized() {
    let app = TestApp::new();
    let (status, body) = app
        .send(Method::GET, "/api/auth/me", Some("not-a-jwt"), None)
        .await;
    assert_error(status, &body, StatusCode::UNAUTHORIZED);

    // A token signed by a different deployment.
    let other = TestApp::new_with_secret("some-other-secret");
    let foreign = other.signup("elsewhere@example.com").await;
    let (status, body) = app
        .send(Method::GET, "/api/auth/me", Some(&foreign.token), None)
        .await;
    assert_error(status, &body, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_for_deleted_or_unknown_user_is_unauthorized() {
    // Same secret, different store: the token verifies but the user is absent.
    let issuer = TestApp::new();
    let session = issuer.signup("ghost@example.com").await;

    let app = TestApp::new();
    let (status, body) = app
        .send(Method::GET, "/api/projects", Some(&session.token), None)
        .await;
    assert_error(status, &body, StatusCode::UNAUTHORIZED);
}
