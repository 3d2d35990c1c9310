use diesel::prelude::*;

use crate::db::models::project::ProjectSummary;
use crate::db::models::task::{NewTask, Task, TaskChanges};

pub struct TaskRepo;

impl TaskRepo {
    /// Tasks reachable through projects owned by `owner`, with their project
    /// summary, newest first.
    pub fn list_by_owner(
        conn: &mut PgConnection,
        owner: uuid::Uuid,
        project_filter: Option<uuid::Uuid>,
    ) -> Result<Vec<(Task, ProjectSummary)>, diesel::result::Error> {
        use crate::schema::{projects, tasks};
        let mut query = tasks::table
            .inner_join(projects::table)
            .filter(projects::owner_id.eq(owner))
            .order((tasks::created_at.desc(), tasks::id.desc()))
            .select((Task::as_select(), ProjectSummary::as_select()))
            .into_boxed();

        if let Some(target) = project_filter {
            query = query.filter(tasks::project_id.eq(target));
        }

        query.load::<(Task, ProjectSummary)>(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        task_id: uuid::Uuid,
    ) -> Result<Option<Task>, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        tasks
            .filter(id.eq(task_id))
            .select(Task::as_select())
            .first::<Task>(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_task: &NewTask,
    ) -> Result<Task, diesel::result::Error> {
        diesel::insert_into(crate::schema::tasks::table)
            .values(new_task)
            .returning(Task::as_returning())
            .get_result(conn)
    }

    pub fn update_fields(
        conn: &mut PgConnection,
        task_id: uuid::Uuid,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        diesel::update(tasks.filter(id.eq(task_id)))
            .set(changes)
            .returning(Task::as_returning())
            .get_result(conn)
            .optional()
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        task_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        diesel::delete(tasks.filter(id.eq(task_id))).execute(conn)
    }
}
