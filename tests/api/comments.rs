use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use super::{Session, TestApp, assert_error, error_fields};

async fn task_uri(app: &TestApp, session: &Session) -> String {
    let project = app.create_project(session, "Board").await;
    let task = app
        .create_task(session, project["id"].as_str().unwrap(), json!({ "title": "Discuss" }))
        .await;
    format!("/api/tasks/{}/comments", task["id"].as_str().unwrap())
}

#[tokio::test]
async fn create_comment_takes_author_from_session() {
    let app = TestApp::new();
    let session = app.signup("author@example.com").await;
    let uri = task_uri(&app, &session).await;

    let (status, comment) = app
        .send(
            Method::POST,
            &uri,
            Some(&session.token),
            Some(json!({ "content": "First!", "authorId": "someone-else" })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(comment["content"], json!("First!"));
    assert_eq!(comment["authorId"], json!(session.user_id));
    assert_eq!(comment["author"]["email"], json!("author@example.com"));
    assert!(comment["author"].get("passwordHash").is_none());
}

#[tokio::test]
async fn comments_are_listed_oldest_first() {
    let app = TestApp::new();
    let session = app.signup("author@example.com").await;
    let uri = task_uri(&app, &session).await;

    for content in ["one", "two", "three"] {
        let (status, _) = app
            .send(
                Method::POST,
                &uri,
                Some(&session.token),
                Some(json!({ "content": content })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, comments) = app.send(Method::GET, &uri, Some(&session.token), None).await;
    assert_eq!(status, StatusCode::OK);
    let contents: Vec<&str> = comments
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn empty_comment_is_rejected() {
    let app = TestApp::new();
    let session = app.signup("author@example.com").await;
    let uri = task_uri(&app, &session).await;

    let (status, body) = app
        .send(Method::POST, &uri, Some(&session.token), Some(json!({ "content": "" })))
        .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["content"]);

    let (_, comments) = app.send(Method::GET, &uri, Some(&session.token), None).await;
    assert_eq!(comments, Value::Array(Vec::new()));
}

#[tokio::test]
async fn comments_on_foreign_task_are_not_found() {
    let app = TestApp::new();
    let alice = app.signup("alice@example.com").await;
    let bob = app.signup("bob@example.com").await;
    let uri = task_uri(&app, &alice).await;

    let (status, body) = app.send(Method::GET, &uri, Some(&bob.token), None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send(Method::POST, &uri, Some(&bob.token), Some(json!({ "content": "hi" })))
        .await;
    assert_error(status, &body, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn task_detail_embeds_comments() {
    let app = TestApp::new();
    let session = app.signup("author@example.com").await;
    let uri = task_uri(&app, &session).await;
    app.send(
        Method::POST,
        &uri,
        Some(&session.token),
        Some(json!({ "content": "Looks good" })),
    )
    .await;

    let detail_uri = uri.trim_end_matches("/comments").to_string();
    let (status, task) = app.send(Method::GET, &detail_uri, Some(&session.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task["comments"][0]["content"], json!("Looks good"));
    assert_eq!(task["comments"][0]["author"]["id"], json!(session.user_id));
    assert_eq!(task["labels"], json!([]));
}
