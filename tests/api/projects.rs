use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use super::{TestApp, assert_error, error_fields};

#[tokio::test]
async fn create_project_takes_owner_from_session() {
    let app = TestApp::new();
    let session = app.signup("owner@example.com").await;
    let intruder = Uuid::new_v4().to_string();

    let (status, project) = app
        .send(
            Method::POST,
            "/api/projects",
            Some(&session.token),
            Some(json!({ "name": "X", "ownerId": intruder })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(project["id"].is_string());
    assert_eq!(project["name"], json!("X"));
    assert!(project["description"].is_null());
    assert_eq!(project["status"], json!("ACTIVE"));
    assert_eq!(project["ownerId"], json!(session.user_id));
    assert_eq!(project["owner"]["id"], json!(session.user_id));
    assert_eq!(project["owner"]["email"], json!("owner@example.com"));
}

#[tokio::test]
async fn create_project_without_name_persists_nothing() {
    let app = TestApp::new();
    let session = app.signup("owner@example.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/projects",
            Some(&session.token),
            Some(json!({ "description": "no name" })),
        )
        .await;

    assert_error(status, &body, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["name"]);
    assert_eq!(body["errors"][0]["code"], json!("length"));

    let user_id = Uuid::parse_str(&session.user_id).unwrap();
    assert!(app.store.list_projects_by_owner(user_id).unwrap().is_empty());
}

#[tokio::test]
async fn create_project_rejects_unknown_status() {
    let app = TestApp::new();
    let session = app.signup("owner@example.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/projects",
            Some(&session.token),
            Some(json!({ "name": "X", "status": "DELETED" })),
        )
        .await;

    assert_error(status, &body, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], json!("status"));
    assert_eq!(body["errors"][0]["code"], json!("invalid_enum"));
}

#[tokio::test]
async fn listing_is_scoped_to_the_owner() {
    let app = TestApp::new();
    let alice = app.signup("alice@example.com").await;
    let bob = app.signup("bob@example.com").await;

    app.create_project(&alice, "Alice One").await;
    app.create_project(&alice, "Alice Two").await;
    let bobs = app.create_project(&bob, "Bob Only").await;

    let (status, listed) = app
        .send(Method::GET, "/api/projects", Some(&alice.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|p| p["ownerId"] == json!(alice.user_id)));
    assert!(listed.iter().all(|p| p["id"] != bobs["id"]));
    // Newest first.
    assert_eq!(listed[0]["name"], json!("Alice Two"));
    assert!(listed[0]["tasks"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn foreign_project_is_not_found() {
    let app = TestApp::new();
    let alice = app.signup("alice@example.com").await;
    let bob = app.signup("bob@example.com").await;
    let project = app.create_project(&alice, "Private").await;
    let uri = format!("/api/projects/{}", project["id"].as_str().unwrap());

    let (status, body) = app.send(Method::GET, &uri, Some(&bob.token), None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send(Method::PATCH, &uri, Some(&bob.token), Some(json!({ "name": "Mine" })))
        .await;
    assert_error(status, &body, StatusCode::NOT_FOUND);

    let (status, body) = app.send(Method::DELETE, &uri, Some(&bob.token), None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND);

    let (status, project) = app.send(Method::GET, &uri, Some(&alice.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(project["name"], json!("Private"));
}

#[tokio::test]
async fn non_uuid_project_id_is_not_found() {
    let app = TestApp::new();
    let session = app.signup("owner@example.com").await;
    let (status, body) = app
        .send(Method::GET, "/api/projects/abc", Some(&session.token), None)
        .await;
    assert_error(status, &body, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_and_put_merge_supplied_fields() {
    let app = TestApp::new();
    let session = app.signup("owner@example.com").await;
    let project = app.create_project(&session, "Draft").await;
    let uri = format!("/api/projects/{}", project["id"].as_str().unwrap());

    let (status, updated) = app
        .send(
            Method::PATCH,
            &uri,
            Some(&session.token),
            Some(json!({ "status": "ARCHIVED" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], json!("ARCHIVED"));
    assert_eq!(updated["name"], json!("Draft"));
    assert_eq!(updated["owner"]["id"], json!(session.user_id));

    let (status, updated) = app
        .send(
            Method::PUT,
            &uri,
            Some(&session.token),
            Some(json!({ "description": "Now described" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], json!("Now described"));
    assert_eq!(updated["status"], json!("ARCHIVED"));
}

#[tokio::test]
async fn deleting_a_project_removes_its_tasks() {
    let app = TestApp::new();
    let session = app.signup("owner@example.com").await;
    let project = app.create_project(&session, "Short lived").await;
    let project_id = project["id"].as_str().unwrap();
    let task = app
        .create_task(&session, project_id, json!({ "title": "Orphan?" }))
        .await;

    let (status, body) = app
        .send(
            Method::DELETE,
            &format!("/api/projects/{}", project_id),
            Some(&session.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, _) = app
        .send(
            Method::GET,
            &format!("/api/tasks/{}", task["id"].as_str().unwrap()),
            Some(&session.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unauthenticated_project_writes_have_no_effect() {
    let app = TestApp::new();
    let session = app.signup("owner@example.com").await;
    let project = app.create_project(&session, "Guarded").await;
    let uri = format!("/api/projects/{}", project["id"].as_str().unwrap());

    let (status, body) = app
        .send(Method::POST, "/api/projects", None, Some(json!({ "name": "Sneaky" })))
        .await;
    assert_error(status, &body, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send(Method::PATCH, &uri, None, Some(json!({ "name": "Renamed" })))
        .await;
    assert_error(status, &body, StatusCode::UNAUTHORIZED);

    let (status, body) = app.send(Method::DELETE, &uri, None, None).await;
    assert_error(status, &body, StatusCode::UNAUTHORIZED);

    let user_id = Uuid::parse_str(&session.user_id).unwrap();
    let projects = app.store.list_projects_by_owner(user_id).unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].project.name, "Guarded");
}

#[tokio::test]
async fn unauthenticated_request_is_rejected_before_body_validation() {
    let app = TestApp::new();
    let (status, body) = app
        .send_raw(Method::POST, "/api/projects", None, "application/json", "{not json")
        .await;
    assert_error(status, &body, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn explicit_null_name_or_status_is_rejected() {
    let app = TestApp::new();
    let session = app.signup("owner@example.com").await;
    let project = app.create_project(&session, "Stable").await;
    let uri = format!("/api/projects/{}", project["id"].as_str().unwrap());

    for body in [json!({ "name": null }), json!({ "status": null })] {
        let (status, response) = app
            .send(Method::PATCH, &uri, Some(&session.token), Some(body))
            .await;
        assert_error(status, &response, StatusCode::BAD_REQUEST);
        assert_eq!(response["errors"][0]["code"], json!("invalid_type"));
    }

    let (_, fetched) = app.send(Method::GET, &uri, Some(&session.token), None).await;
    assert_eq!(fetched["name"], json!("Stable"));
    assert_eq!(fetched["status"], json!("ACTIVE"));
    assert_eq!(fetched["updatedAt"], project["updatedAt"]);
}
