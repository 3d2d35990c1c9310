// Wire-shape checks for the request and response DTOs.

use serde_json::json;

#[test]
fn update_task_assignee_distinguishes_absent_null_and_value() {
    use taskforge::db::models::task::UpdateTaskRequest;
    use uuid::Uuid;

    let absent: UpdateTaskRequest = serde_json::from_value(json!({ "status": "DONE" })).unwrap();
    assert_eq!(absent.assignee_id, None);

    let cleared: UpdateTaskRequest =
        serde_json::from_value(json!({ "assigneeId": null })).unwrap();
    assert_eq!(cleared.assignee_id, Some(None));

    let id = Uuid::new_v4();
    let set: UpdateTaskRequest = serde_json::from_value(json!({ "assigneeId": id })).unwrap();
    assert_eq!(set.assignee_id, Some(Some(id)));
}

#[test]
fn update_task_changes_only_carry_supplied_fields() {
    use taskforge::db::enums::TaskStatus;
    use taskforge::db::models::task::UpdateTaskRequest;

    let req: UpdateTaskRequest = serde_json::from_value(json!({ "status": "IN_PROGRESS" })).unwrap();
    let changes = req.into_changes().unwrap();
    assert_eq!(changes.status, Some(TaskStatus::InProgress));
    assert!(changes.title.is_none());
    assert!(changes.description.is_none());
    assert!(changes.priority.is_none());
    assert!(changes.assignee_id.is_none());
}

#[test]
fn create_task_defaults_status_and_priority() {
    use taskforge::db::enums::{TaskPriority, TaskStatus};
    use taskforge::db::models::task::CreateTaskRequest;
    use uuid::Uuid;

    let project_id = Uuid::new_v4();
    let req: CreateTaskRequest =
        serde_json::from_value(json!({ "title": "t", "projectId": project_id })).unwrap();
    let task = req.into_new_task().unwrap();
    assert_eq!(task.status, TaskStatus::Todo);
    assert_eq!(task.priority, TaskPriority::Medium);
    assert_eq!(task.project_id, project_id);
    assert!(task.assignee_id.is_none());
}

#[test]
fn invalid_uuid_in_body_is_a_decode_error() {
    use taskforge::db::models::task::CreateTaskRequest;

    let result = serde_json::from_value::<CreateTaskRequest>(
        json!({ "title": "t", "projectId": "not-a-uuid" }),
    );
    assert!(result.is_err());
}

#[test]
fn enums_use_upper_case_wire_values() {
    use taskforge::db::enums::{ProjectStatus, TaskPriority, TaskStatus, UserRole};

    assert_eq!(serde_json::to_value(TaskStatus::InProgress).unwrap(), json!("IN_PROGRESS"));
    assert_eq!(serde_json::to_value(TaskPriority::Urgent).unwrap(), json!("URGENT"));
    assert_eq!(serde_json::to_value(ProjectStatus::Archived).unwrap(), json!("ARCHIVED"));
    assert_eq!(serde_json::to_value(UserRole::Viewer).unwrap(), json!("VIEWER"));
    assert_eq!(TaskStatus::allowed(), "TODO, IN_PROGRESS, DONE");
    assert!("done".parse::<TaskStatus>().is_err());
}

#[test]
fn error_response_omits_empty_details() {
    use taskforge::db::models::api::{ErrorDetail, ErrorResponse};

    let body = serde_json::to_value(ErrorResponse::not_found("Task not found")).unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["code"], json!(404));
    assert!(body.get("errors").is_none());

    let body = serde_json::to_value(ErrorResponse::validation_failed(vec![ErrorDetail {
        field: None,
        code: "INVALID_BODY".into(),
        message: "bad".into(),
    }]))
    .unwrap();
    assert_eq!(body["errors"], json!([{ "code": "INVALID_BODY", "message": "bad" }]));
}

#[test]
fn user_serialization_hides_password_hash() {
    use taskforge::db::enums::UserRole;
    use taskforge::db::models::user::{NewUser, User};

    let new = NewUser::new("a@b.co".into(), "secret-hash".into(), "A".into(), UserRole::Member);
    let user = User {
        id: new.id,
        email: new.email,
        password_hash: new.password_hash,
        name: new.name,
        role: new.role,
        created_at: new.created_at,
        updated_at: new.updated_at,
    };
    let body = serde_json::to_value(&user).unwrap();
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("password_hash").is_none());
    assert_eq!(body["role"], json!("MEMBER"));
    assert!(body["createdAt"].is_string());
}
