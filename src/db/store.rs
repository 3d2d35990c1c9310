use std::sync::Arc;

use uuid::Uuid;

use crate::db::models::{
    CommentWithAuthor, Label, NewComment, NewLabel, NewProject, NewTask, NewUser,
    Project, ProjectChanges, ProjectDetail, ProjectWithOwner, Task, TaskChanges, TaskDetail,
    TaskWithRelations, User,
};
use crate::error::AppResult;

pub trait UserRepository {
    fn find_user_by_id(&self, user_id: Uuid) -> AppResult<Option<User>>;
    fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;
    /// Fails with a field error on `email` when the address is taken.
    fn insert_user(&self, new_user: NewUser) -> AppResult<User>;
    fn count_users(&self) -> AppResult<i64>;
}

pub trait ProjectRepository {
    /// Newest first, each with its owner and tasks.
    fn list_projects_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<ProjectDetail>>;
    fn find_project_by_id(&self, project_id: Uuid) -> AppResult<Option<Project>>;
    fn find_project_detail(&self, project_id: Uuid) -> AppResult<Option<ProjectDetail>>;
    fn insert_project(&self, new_project: NewProject) -> AppResult<ProjectWithOwner>;
    fn update_project_fields(
        &self,
        project_id: Uuid,
        changes: ProjectChanges,
    ) -> AppResult<Option<ProjectWithOwner>>;
    /// Removes the project with its tasks and labels.
    fn delete_project_by_id(&self, project_id: Uuid) -> AppResult<bool>;
}

pub trait TaskRepository {
    /// Tasks across every project owned by `owner_id`, newest first.
    fn list_tasks_by_owner(
        &self,
        owner_id: Uuid,
        project_id: Option<Uuid>,
    ) -> AppResult<Vec<TaskWithRelations>>;
    fn find_task_by_id(&self, task_id: Uuid) -> AppResult<Option<Task>>;
    fn find_task_detail(&self, task_id: Uuid) -> AppResult<Option<TaskDetail>>;
    fn insert_task(&self, new_task: NewTask) -> AppResult<TaskWithRelations>;
    fn update_task_fields(
        &self,
        task_id: Uuid,
        changes: TaskChanges,
    ) -> AppResult<Option<TaskWithRelations>>;
    /// Removes the task with its comments and label links.
    fn delete_task_by_id(&self, task_id: Uuid) -> AppResult<bool>;
}

pub trait CommentRepository {
    /// Oldest first.
    fn list_comments_by_task(&self, task_id: Uuid) -> AppResult<Vec<CommentWithAuthor>>;
    fn insert_comment(&self, new_comment: NewComment) -> AppResult<CommentWithAuthor>;
}

pub trait LabelRepository {
    fn list_labels_by_project(&self, project_id: Uuid) -> AppResult<Vec<Label>>;
    fn find_label_by_id(&self, label_id: Uuid) -> AppResult<Option<Label>>;
    fn insert_label(&self, new_label: NewLabel) -> AppResult<Label>;
    /// No-op when the link already exists.
    fn attach_label(&self, task_id: Uuid, label_id: Uuid) -> AppResult<()>;
    fn detach_label(&self, task_id: Uuid, label_id: Uuid) -> AppResult<bool>;
}

pub trait Store:
    UserRepository + ProjectRepository + TaskRepository + CommentRepository + LabelRepository + Send + Sync
{
}

impl<T> Store for T where
    T: UserRepository
        + ProjectRepository
        + TaskRepository
        + CommentRepository
        + LabelRepository
        + Send
        + Sync
{
}

pub type SharedStore = Arc<dyn Store>;
