//! Process-local store used by the test-suite and `STORAGE_BACKEND=memory`.
//! Rows are kept in insertion order, which doubles as the ordering
//! tie-break when timestamps collide.

use parking_lot::RwLock;
use uuid::Uuid;

use crate::db::models::api::error_codes;
use crate::db::models::{
    Comment, CommentWithAuthor, Label, NewComment, NewLabel, NewProject, NewTask, NewUser,
    Project, ProjectChanges, ProjectDetail, ProjectSummary, ProjectWithOwner, Task, TaskChanges,
    TaskDetail, TaskLabel, TaskWithRelations, User, UserSummary,
};
use crate::db::store::{
    CommentRepository, LabelRepository, ProjectRepository, TaskRepository, UserRepository,
};
use crate::error::{AppError, AppResult};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    projects: Vec<Project>,
    tasks: Vec<Task>,
    comments: Vec<Comment>,
    labels: Vec<Label>,
    task_labels: Vec<TaskLabel>,
}

impl Tables {
    fn user_summary(&self, user_id: Uuid) -> Option<UserSummary> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(UserSummary::from)
    }

    fn project_summary(&self, project_id: Uuid) -> Option<ProjectSummary> {
        self.projects
            .iter()
            .find(|p| p.id == project_id)
            .map(|p| ProjectSummary {
                id: p.id,
                name: p.name.clone(),
            })
    }

    /// Newest first; later inserts win ties.
    fn tasks_of(&self, project_id: Uuid) -> Vec<Task> {
        newest_first(
            self.tasks.iter().filter(|t| t.project_id == project_id),
            |t| t.created_at,
        )
    }

    fn with_owner(&self, project: Project) -> AppResult<ProjectWithOwner> {
        let owner = self
            .user_summary(project.owner_id)
            .ok_or_else(|| AppError::internal("project owner is missing"))?;
        Ok(ProjectWithOwner { project, owner })
    }

    fn with_relations(&self, task: Task) -> AppResult<TaskWithRelations> {
        let project = self
            .project_summary(task.project_id)
            .ok_or_else(|| AppError::internal("task project is missing"))?;
        let assignee = task.assignee_id.and_then(|id| self.user_summary(id));
        Ok(TaskWithRelations {
            task,
            assignee,
            project,
        })
    }

    fn comments_of(&self, task_id: Uuid) -> Vec<CommentWithAuthor> {
        let mut thread: Vec<&Comment> =
            self.comments.iter().filter(|c| c.task_id == task_id).collect();
        thread.sort_by_key(|c| c.created_at);
        thread
            .into_iter()
            .filter_map(|comment| {
                self.user_summary(comment.author_id)
                    .map(|author| CommentWithAuthor {
                        comment: comment.clone(),
                        author,
                    })
            })
            .collect()
    }

    fn remove_task_rows(&mut self, task_ids: &[Uuid]) {
        self.comments.retain(|c| !task_ids.contains(&c.task_id));
        self.task_labels.retain(|l| !task_ids.contains(&l.task_id));
        self.tasks.retain(|t| !task_ids.contains(&t.id));
    }
}

fn newest_first<'a, T, I, F>(rows: I, created_at: F) -> Vec<T>
where
    T: Clone + 'a,
    I: DoubleEndedIterator<Item = &'a T>,
    F: Fn(&T) -> chrono::DateTime<chrono::Utc>,
{
    let mut out: Vec<T> = rows.rev().cloned().collect();
    out.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    out
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for MemoryStore {
    fn find_user_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let tables = self.tables.read();
        Ok(tables.users.iter().find(|u| u.id == user_id).cloned())
    }

    fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    fn insert_user(&self, new_user: NewUser) -> AppResult<User> {
        let mut tables = self.tables.write();
        if tables.users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::invalid_field(
                "email",
                error_codes::EMAIL_TAKEN,
                "Email is already registered",
            ));
        }
        let user = User {
            id: new_user.id,
            email: new_user.email,
            password_hash: new_user.password_hash,
            name: new_user.name,
            role: new_user.role,
            created_at: new_user.created_at,
            updated_at: new_user.updated_at,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    fn count_users(&self) -> AppResult<i64> {
        Ok(self.tables.read().users.len() as i64)
    }
}

impl ProjectRepository for MemoryStore {
    fn list_projects_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<ProjectDetail>> {
        let tables = self.tables.read();
        let Some(owner) = tables.user_summary(owner_id) else {
            return Ok(Vec::new());
        };
        let owned = newest_first(
            tables.projects.iter().filter(|p| p.owner_id == owner_id),
            |p| p.created_at,
        );
        Ok(owned
            .into_iter()
            .map(|project| ProjectDetail {
                tasks: tables.tasks_of(project.id),
                owner: owner.clone(),
                project,
            })
            .collect())
    }

    fn find_project_by_id(&self, project_id: Uuid) -> AppResult<Option<Project>> {
        let tables = self.tables.read();
        Ok(tables.projects.iter().find(|p| p.id == project_id).cloned())
    }

    fn find_project_detail(&self, project_id: Uuid) -> AppResult<Option<ProjectDetail>> {
        let tables = self.tables.read();
        let Some(project) = tables.projects.iter().find(|p| p.id == project_id).cloned() else {
            return Ok(None);
        };
        let tasks = tables.tasks_of(project.id);
        let ProjectWithOwner { project, owner } = tables.with_owner(project)?;
        Ok(Some(ProjectDetail {
            project,
            owner,
            tasks,
        }))
    }

    fn insert_project(&self, new_project: NewProject) -> AppResult<ProjectWithOwner> {
        let mut tables = self.tables.write();
        let project = Project {
            id: new_project.id,
            name: new_project.name,
            description: new_project.description,
            status: new_project.status,
            owner_id: new_project.owner_id,
            created_at: new_project.created_at,
            updated_at: new_project.updated_at,
        };
        let created = tables.with_owner(project.clone())?;
        tables.projects.push(project);
        Ok(created)
    }

    fn update_project_fields(
        &self,
        project_id: Uuid,
        changes: ProjectChanges,
    ) -> AppResult<Option<ProjectWithOwner>> {
        let mut tables = self.tables.write();
        let Some(project) = tables.projects.iter_mut().find(|p| p.id == project_id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            project.name = name;
        }
        if let Some(description) = changes.description {
            project.description = Some(description);
        }
        if let Some(status) = changes.status {
            project.status = status;
        }
        project.updated_at = changes.updated_at;
        let updated = project.clone();
        tables.with_owner(updated).map(Some)
    }

    fn delete_project_by_id(&self, project_id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write();
        let before = tables.projects.len();
        tables.projects.retain(|p| p.id != project_id);
        if tables.projects.len() == before {
            return Ok(false);
        }
        let task_ids: Vec<Uuid> = tables
            .tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .map(|t| t.id)
            .collect();
        tables.remove_task_rows(&task_ids);
        let label_ids: Vec<Uuid> = tables
            .labels
            .iter()
            .filter(|l| l.project_id == project_id)
            .map(|l| l.id)
            .collect();
        tables.task_labels.retain(|l| !label_ids.contains(&l.label_id));
        tables.labels.retain(|l| l.project_id != project_id);
        Ok(true)
    }
}

impl TaskRepository for MemoryStore {
    fn list_tasks_by_owner(
        &self,
        owner_id: Uuid,
        project_id: Option<Uuid>,
    ) -> AppResult<Vec<TaskWithRelations>> {
        let tables = self.tables.read();
        let owned: Vec<Uuid> = tables
            .projects
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .filter(|p| project_id.map_or(true, |wanted| p.id == wanted))
            .map(|p| p.id)
            .collect();
        newest_first(
            tables.tasks.iter().filter(|t| owned.contains(&t.project_id)),
            |t| t.created_at,
        )
        .into_iter()
        .map(|task| tables.with_relations(task))
        .collect()
    }

    fn find_task_by_id(&self, task_id: Uuid) -> AppResult<Option<Task>> {
        let tables = self.tables.read();
        Ok(tables.tasks.iter().find(|t| t.id == task_id).cloned())
    }

    fn find_task_detail(&self, task_id: Uuid) -> AppResult<Option<TaskDetail>> {
        let tables = self.tables.read();
        let Some(task) = tables.tasks.iter().find(|t| t.id == task_id).cloned() else {
            return Ok(None);
        };
        let comments = tables.comments_of(task.id);
        let mut labels: Vec<Label> = tables
            .task_labels
            .iter()
            .filter(|link| link.task_id == task.id)
            .filter_map(|link| tables.labels.iter().find(|l| l.id == link.label_id))
            .cloned()
            .collect();
        labels.sort_by(|a, b| a.name.cmp(&b.name));
        let TaskWithRelations {
            task,
            assignee,
            project,
        } = tables.with_relations(task)?;
        Ok(Some(TaskDetail {
            task,
            assignee,
            project,
            comments,
            labels,
        }))
    }

    fn insert_task(&self, new_task: NewTask) -> AppResult<TaskWithRelations> {
        let mut tables = self.tables.write();
        let task = Task {
            id: new_task.id,
            title: new_task.title,
            description: new_task.description,
            status: new_task.status,
            priority: new_task.priority,
            project_id: new_task.project_id,
            assignee_id: new_task.assignee_id,
            created_at: new_task.created_at,
            updated_at: new_task.updated_at,
        };
        let created = tables.with_relations(task.clone())?;
        tables.tasks.push(task);
        Ok(created)
    }

    fn update_task_fields(
        &self,
        task_id: Uuid,
        changes: TaskChanges,
    ) -> AppResult<Option<TaskWithRelations>> {
        let mut tables = self.tables.write();
        let Some(task) = tables.tasks.iter_mut().find(|t| t.id == task_id) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(description) = changes.description {
            task.description = Some(description);
        }
        if let Some(status) = changes.status {
            task.status = status;
        }
        if let Some(priority) = changes.priority {
            task.priority = priority;
        }
        if let Some(assignee_id) = changes.assignee_id {
            task.assignee_id = assignee_id;
        }
        task.updated_at = changes.updated_at;
        let updated = task.clone();
        tables.with_relations(updated).map(Some)
    }

    fn delete_task_by_id(&self, task_id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write();
        if !tables.tasks.iter().any(|t| t.id == task_id) {
            return Ok(false);
        }
        tables.remove_task_rows(&[task_id]);
        Ok(true)
    }
}

impl CommentRepository for MemoryStore {
    fn list_comments_by_task(&self, task_id: Uuid) -> AppResult<Vec<CommentWithAuthor>> {
        Ok(self.tables.read().comments_of(task_id))
    }

    fn insert_comment(&self, new_comment: NewComment) -> AppResult<CommentWithAuthor> {
        let mut tables = self.tables.write();
        let author = tables
            .user_summary(new_comment.author_id)
            .ok_or_else(|| AppError::internal("comment author is missing"))?;
        let comment = Comment {
            id: new_comment.id,
            content: new_comment.content,
            task_id: new_comment.task_id,
            author_id: new_comment.author_id,
            created_at: new_comment.created_at,
            updated_at: new_comment.updated_at,
        };
        tables.comments.push(comment.clone());
        Ok(CommentWithAuthor { comment, author })
    }
}

impl LabelRepository for MemoryStore {
    fn list_labels_by_project(&self, project_id: Uuid) -> AppResult<Vec<Label>> {
        let tables = self.tables.read();
        let mut labels: Vec<Label> = tables
            .labels
            .iter()
            .filter(|l| l.project_id == project_id)
            .cloned()
            .collect();
        labels.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(labels)
    }

    fn find_label_by_id(&self, label_id: Uuid) -> AppResult<Option<Label>> {
        let tables = self.tables.read();
        Ok(tables.labels.iter().find(|l| l.id == label_id).cloned())
    }

    fn insert_label(&self, new_label: NewLabel) -> AppResult<Label> {
        let label = Label {
            id: new_label.id,
            name: new_label.name,
            color: new_label.color,
            project_id: new_label.project_id,
        };
        self.tables.write().labels.push(label.clone());
        Ok(label)
    }

    fn attach_label(&self, task_id: Uuid, label_id: Uuid) -> AppResult<()> {
        let mut tables = self.tables.write();
        let link = TaskLabel { task_id, label_id };
        if !tables.task_labels.contains(&link) {
            tables.task_labels.push(link);
        }
        Ok(())
    }

    fn detach_label(&self, task_id: Uuid, label_id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write();
        let before = tables.task_labels.len();
        tables
            .task_labels
            .retain(|l| !(l.task_id == task_id && l.label_id == label_id));
        Ok(tables.task_labels.len() != before)
    }
}
