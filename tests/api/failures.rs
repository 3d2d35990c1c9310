use axum::http::{Method, StatusCode};
use serde_json::json;
use std::sync::Arc;
use taskforge::db::memory::MemoryStore;
use taskforge::db::models::{
    CommentWithAuthor, Label, NewComment, NewLabel, NewProject, NewTask, NewUser, Project,
    ProjectChanges, ProjectDetail, ProjectWithOwner, Task, TaskChanges, TaskDetail,
    TaskWithRelations, User,
};
use taskforge::db::store::{
    CommentRepository, LabelRepository, ProjectRepository, TaskRepository, UserRepository,
};
use taskforge::error::{AppError, AppResult};
use uuid::Uuid;

use super::{TestApp, assert_error};

const SECRET_DETAIL: &str = "password=hunter2 host=10.0.0.3";

#[derive(Clone, Copy)]
enum Fault {
    Error,
    Panic,
}

/// Memory store whose project listing breaks in the configured way.
struct BrokenStore {
    inner: MemoryStore,
    fault: Fault,
}

impl BrokenStore {
    fn new(fault: Fault) -> Self {
        Self {
            inner: MemoryStore::new(),
            fault,
        }
    }
}

impl UserRepository for BrokenStore {
    fn find_user_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        self.inner.find_user_by_id(user_id)
    }
    fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.inner.find_user_by_email(email)
    }
    fn insert_user(&self, new_user: NewUser) -> AppResult<User> {
        self.inner.insert_user(new_user)
    }
    fn count_users(&self) -> AppResult<i64> {
        self.inner.count_users()
    }
}

impl ProjectRepository for BrokenStore {
    fn list_projects_by_owner(&self, _owner_id: Uuid) -> AppResult<Vec<ProjectDetail>> {
        match self.fault {
            Fault::Error => Err(AppError::internal(SECRET_DETAIL)),
            Fault::Panic => panic!("{}", SECRET_DETAIL),
        }
    }
    fn find_project_by_id(&self, project_id: Uuid) -> AppResult<Option<Project>> {
        self.inner.find_project_by_id(project_id)
    }
    fn find_project_detail(&self, project_id: Uuid) -> AppResult<Option<ProjectDetail>> {
        self.inner.find_project_detail(project_id)
    }
    fn insert_project(&self, new_project: NewProject) -> AppResult<ProjectWithOwner> {
        self.inner.insert_project(new_project)
    }
    fn update_project_fields(
        &self,
        project_id: Uuid,
        changes: ProjectChanges,
    ) -> AppResult<Option<ProjectWithOwner>> {
        self.inner.update_project_fields(project_id, changes)
    }
    fn delete_project_by_id(&self, project_id: Uuid) -> AppResult<bool> {
        self.inner.delete_project_by_id(project_id)
    }
}

impl TaskRepository for BrokenStore {
    fn list_tasks_by_owner(
        &self,
        owner_id: Uuid,
        project_id: Option<Uuid>,
    ) -> AppResult<Vec<TaskWithRelations>> {
        self.inner.list_tasks_by_owner(owner_id, project_id)
    }
    fn find_task_by_id(&self, task_id: Uuid) -> AppResult<Option<Task>> {
        self.inner.find_task_by_id(task_id)
    }
    fn find_task_detail(&self, task_id: Uuid) -> AppResult<Option<TaskDetail>> {
        self.inner.find_task_detail(task_id)
    }
    fn insert_task(&self, new_task: NewTask) -> AppResult<TaskWithRelations> {
        self.inner.insert_task(new_task)
    }
    fn update_task_fields(
        &self,
        task_id: Uuid,
        changes: TaskChanges,
    ) -> AppResult<Option<TaskWithRelations>> {
        self.inner.update_task_fields(task_id, changes)
    }
    fn delete_task_by_id(&self, task_id: Uuid) -> AppResult<bool> {
        self.inner.delete_task_by_id(task_id)
    }
}

impl CommentRepository for BrokenStore {
    fn list_comments_by_task(&self, task_id: Uuid) -> AppResult<Vec<CommentWithAuthor>> {
        self.inner.list_comments_by_task(task_id)
    }
    fn insert_comment(&self, new_comment: NewComment) -> AppResult<CommentWithAuthor> {
        self.inner.insert_comment(new_comment)
    }
}

impl LabelRepository for BrokenStore {
    fn list_labels_by_project(&self, project_id: Uuid) -> AppResult<Vec<Label>> {
        self.inner.list_labels_by_project(project_id)
    }
    fn find_label_by_id(&self, label_id: Uuid) -> AppResult<Option<Label>> {
        self.inner.find_label_by_id(label_id)
    }
    fn insert_label(&self, new_label: NewLabel) -> AppResult<Label> {
        self.inner.insert_label(new_label)
    }
    fn attach_label(&self, task_id: Uuid, label_id: Uuid) -> AppResult<()> {
        self.inner.attach_label(task_id, label_id)
    }
    fn detach_label(&self, task_id: Uuid, label_id: Uuid) -> AppResult<bool> {
        self.inner.detach_label(task_id, label_id)
    }
}

async fn list_projects_with(fault: Fault) {
    let app = TestApp::with_store(Arc::new(BrokenStore::new(fault)));
    let session = app.signup("owner@example.com").await;

    let (status, body) = app
        .send(Method::GET, "/api/projects", Some(&session.token), None)
        .await;

    assert_error(status, &body, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("Internal server error"));
    assert!(body.get("errors").is_none());
    assert!(!body.to_string().contains("10.0.0.3"));
    assert!(!body.to_string().contains("hunter2"));
}

#[tokio::test]
async fn store_error_is_a_generic_500() {
    list_projects_with(Fault::Error).await;
}

#[tokio::test]
async fn store_panic_is_a_generic_500() {
    list_projects_with(Fault::Panic).await;
}
