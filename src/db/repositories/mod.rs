//! Postgres-backed store. Each `*Repo` holds the diesel queries for one
//! table; `PgStore` composes them into the repository traits, hydrating
//! relations inside a single transaction.

pub mod comments;
pub mod labels;
pub mod projects;
pub mod tasks;
pub mod users;

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use crate::db::models::api::error_codes;
use crate::db::models::{
    CommentWithAuthor, Label, NewComment, NewLabel, NewProject, NewTask, NewUser, Project,
    ProjectChanges, ProjectDetail, ProjectWithOwner, Task, TaskChanges, TaskDetail, TaskLabel,
    TaskWithRelations, User, UserSummary,
};
use crate::db::store::{
    CommentRepository, LabelRepository, ProjectRepository, TaskRepository, UserRepository,
};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};

use comments::CommentRepo;
use labels::LabelRepo;
use projects::ProjectRepo;
use tasks::TaskRepo;
use users::UserRepo;

type PgPooled = PooledConnection<ConnectionManager<PgConnection>>;

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> AppResult<PgPooled> {
        Ok(self.pool.get()?)
    }
}

fn with_owner(
    conn: &mut PgConnection,
    project: Project,
) -> Result<ProjectWithOwner, DieselError> {
    let owner = UserRepo::find_summary(conn, project.owner_id)?.ok_or(DieselError::NotFound)?;
    Ok(ProjectWithOwner { project, owner })
}

fn with_relations(conn: &mut PgConnection, task: Task) -> Result<TaskWithRelations, DieselError> {
    let project = ProjectRepo::find_summary(conn, task.project_id)?;
    let assignee = match task.assignee_id {
        Some(user_id) => UserRepo::find_summary(conn, user_id)?,
        None => None,
    };
    Ok(TaskWithRelations {
        task,
        assignee,
        project,
    })
}

impl UserRepository for PgStore {
    fn find_user_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let mut conn = self.conn()?;
        Ok(UserRepo::find_by_id(&mut conn, user_id)?)
    }

    fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let mut conn = self.conn()?;
        Ok(UserRepo::find_by_email(&mut conn, email)?)
    }

    fn insert_user(&self, new_user: NewUser) -> AppResult<User> {
        let mut conn = self.conn()?;
        UserRepo::insert(&mut conn, &new_user).map_err(|e| match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                AppError::invalid_field(
                    "email",
                    error_codes::EMAIL_TAKEN,
                    "Email is already registered",
                )
            }
            other => other.into(),
        })
    }

    fn count_users(&self) -> AppResult<i64> {
        let mut conn = self.conn()?;
        Ok(UserRepo::count(&mut conn)?)
    }
}

impl ProjectRepository for PgStore {
    fn list_projects_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<ProjectDetail>> {
        let mut conn = self.conn()?;
        let details = conn.transaction::<_, DieselError, _>(|conn| {
            let Some(owner) = UserRepo::find_summary(conn, owner_id)? else {
                return Ok(Vec::new());
            };
            let projects = ProjectRepo::list_by_owner(conn, owner_id)?;
            let grouped = ProjectRepo::tasks_grouped(conn, &projects)?;
            Ok(projects
                .into_iter()
                .zip(grouped)
                .map(|(project, tasks)| ProjectDetail {
                    project,
                    owner: owner.clone(),
                    tasks,
                })
                .collect())
        })?;
        Ok(details)
    }

    fn find_project_by_id(&self, project_id: Uuid) -> AppResult<Option<Project>> {
        let mut conn = self.conn()?;
        Ok(ProjectRepo::find_by_id(&mut conn, project_id)?)
    }

    fn find_project_detail(&self, project_id: Uuid) -> AppResult<Option<ProjectDetail>> {
        let mut conn = self.conn()?;
        let detail = conn.transaction::<_, DieselError, _>(|conn| {
            let Some(project) = ProjectRepo::find_by_id(conn, project_id)? else {
                return Ok(None);
            };
            let tasks = ProjectRepo::tasks_grouped(conn, std::slice::from_ref(&project))?
                .into_iter()
                .next()
                .unwrap_or_default();
            let ProjectWithOwner { project, owner } = with_owner(conn, project)?;
            Ok(Some(ProjectDetail {
                project,
                owner,
                tasks,
            }))
        })?;
        Ok(detail)
    }

    fn insert_project(&self, new_project: NewProject) -> AppResult<ProjectWithOwner> {
        let mut conn = self.conn()?;
        let created = conn.transaction::<_, DieselError, _>(|conn| {
            let project = ProjectRepo::insert(conn, &new_project)?;
            with_owner(conn, project)
        })?;
        Ok(created)
    }

    fn update_project_fields(
        &self,
        project_id: Uuid,
        changes: ProjectChanges,
    ) -> AppResult<Option<ProjectWithOwner>> {
        let mut conn = self.conn()?;
        let updated = conn.transaction::<_, DieselError, _>(|conn| {
            match ProjectRepo::update_fields(conn, project_id, &changes)? {
                Some(project) => with_owner(conn, project).map(Some),
                None => Ok(None),
            }
        })?;
        Ok(updated)
    }

    fn delete_project_by_id(&self, project_id: Uuid) -> AppResult<bool> {
        let mut conn = self.conn()?;
        Ok(ProjectRepo::delete_by_id(&mut conn, project_id)? > 0)
    }
}

impl TaskRepository for PgStore {
    fn list_tasks_by_owner(
        &self,
        owner_id: Uuid,
        project_id: Option<Uuid>,
    ) -> AppResult<Vec<TaskWithRelations>> {
        let mut conn = self.conn()?;
        let listed = conn.transaction::<_, DieselError, _>(|conn| {
            let rows = TaskRepo::list_by_owner(conn, owner_id, project_id)?;
            let mut assignee_ids: Vec<Uuid> =
                rows.iter().filter_map(|(task, _)| task.assignee_id).collect();
            assignee_ids.sort_unstable();
            assignee_ids.dedup();
            let assignees: HashMap<Uuid, UserSummary> =
                UserRepo::list_summaries(conn, &assignee_ids)?
                    .into_iter()
                    .map(|user| (user.id, user))
                    .collect();

            Ok(rows
                .into_iter()
                .map(|(task, project)| TaskWithRelations {
                    assignee: task.assignee_id.and_then(|id| assignees.get(&id).cloned()),
                    task,
                    project,
                })
                .collect())
        })?;
        Ok(listed)
    }

    fn find_task_by_id(&self, task_id: Uuid) -> AppResult<Option<Task>> {
        let mut conn = self.conn()?;
        Ok(TaskRepo::find_by_id(&mut conn, task_id)?)
    }

    fn find_task_detail(&self, task_id: Uuid) -> AppResult<Option<TaskDetail>> {
        let mut conn = self.conn()?;
        let detail = conn.transaction::<_, DieselError, _>(|conn| {
            let Some(task) = TaskRepo::find_by_id(conn, task_id)? else {
                return Ok(None);
            };
            let comments = CommentRepo::list_by_task(conn, task.id)?
                .into_iter()
                .map(|(comment, author)| CommentWithAuthor { comment, author })
                .collect();
            let labels = LabelRepo::list_by_task(conn, task.id)?;
            let TaskWithRelations {
                task,
                assignee,
                project,
            } = with_relations(conn, task)?;
            Ok(Some(TaskDetail {
                task,
                assignee,
                project,
                comments,
                labels,
            }))
        })?;
        Ok(detail)
    }

    fn insert_task(&self, new_task: NewTask) -> AppResult<TaskWithRelations> {
        let mut conn = self.conn()?;
        let created = conn.transaction::<_, DieselError, _>(|conn| {
            let task = TaskRepo::insert(conn, &new_task)?;
            with_relations(conn, task)
        })?;
        Ok(created)
    }

    fn update_task_fields(
        &self,
        task_id: Uuid,
        changes: TaskChanges,
    ) -> AppResult<Option<TaskWithRelations>> {
        let mut conn = self.conn()?;
        let updated = conn.transaction::<_, DieselError, _>(|conn| {
            match TaskRepo::update_fields(conn, task_id, &changes)? {
                Some(task) => with_relations(conn, task).map(Some),
                None => Ok(None),
            }
        })?;
        Ok(updated)
    }

    fn delete_task_by_id(&self, task_id: Uuid) -> AppResult<bool> {
        let mut conn = self.conn()?;
        Ok(TaskRepo::delete_by_id(&mut conn, task_id)? > 0)
    }
}

impl CommentRepository for PgStore {
    fn list_comments_by_task(&self, task_id: Uuid) -> AppResult<Vec<CommentWithAuthor>> {
        let mut conn = self.conn()?;
        Ok(CommentRepo::list_by_task(&mut conn, task_id)?
            .into_iter()
            .map(|(comment, author)| CommentWithAuthor { comment, author })
            .collect())
    }

    fn insert_comment(&self, new_comment: NewComment) -> AppResult<CommentWithAuthor> {
        let mut conn = self.conn()?;
        let created = conn.transaction::<_, DieselError, _>(|conn| {
            let comment = CommentRepo::insert(conn, &new_comment)?;
            let author =
                UserRepo::find_summary(conn, comment.author_id)?.ok_or(DieselError::NotFound)?;
            Ok(CommentWithAuthor { comment, author })
        })?;
        Ok(created)
    }
}

impl LabelRepository for PgStore {
    fn list_labels_by_project(&self, project_id: Uuid) -> AppResult<Vec<Label>> {
        let mut conn = self.conn()?;
        Ok(LabelRepo::list_by_project(&mut conn, project_id)?)
    }

    fn find_label_by_id(&self, label_id: Uuid) -> AppResult<Option<Label>> {
        let mut conn = self.conn()?;
        Ok(LabelRepo::find_by_id(&mut conn, label_id)?)
    }

    fn insert_label(&self, new_label: NewLabel) -> AppResult<Label> {
        let mut conn = self.conn()?;
        Ok(LabelRepo::insert(&mut conn, &new_label)?)
    }

    fn attach_label(&self, task_id: Uuid, label_id: Uuid) -> AppResult<()> {
        let mut conn = self.conn()?;
        LabelRepo::attach(&mut conn, &TaskLabel { task_id, label_id })?;
        Ok(())
    }

    fn detach_label(&self, task_id: Uuid, label_id: Uuid) -> AppResult<bool> {
        let mut conn = self.conn()?;
        Ok(LabelRepo::detach(&mut conn, &TaskLabel { task_id, label_id })? > 0)
    }
}
