use diesel::prelude::*;

use crate::db::models::project::{NewProject, Project, ProjectChanges, ProjectSummary};
use crate::db::models::task::Task;

pub struct ProjectRepo;

impl ProjectRepo {
    pub fn list_by_owner(
        conn: &mut PgConnection,
        owner: uuid::Uuid,
    ) -> Result<Vec<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .filter(owner_id.eq(owner))
            .order((created_at.desc(), id.desc()))
            .select(Project::as_select())
            .load::<Project>(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        project_id: uuid::Uuid,
    ) -> Result<Option<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .filter(id.eq(project_id))
            .select(Project::as_select())
            .first::<Project>(conn)
            .optional()
    }

    pub fn find_summary(
        conn: &mut PgConnection,
        project_id: uuid::Uuid,
    ) -> Result<ProjectSummary, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        projects
            .filter(id.eq(project_id))
            .select(ProjectSummary::as_select())
            .first::<ProjectSummary>(conn)
    }

    /// Tasks of every given project, grouped in the same order as `parents`.
    pub fn tasks_grouped(
        conn: &mut PgConnection,
        parents: &[Project],
    ) -> Result<Vec<Vec<Task>>, diesel::result::Error> {
        use crate::schema::tasks;
        let children = Task::belonging_to(parents)
            .order((tasks::created_at.desc(), tasks::id.desc()))
            .select(Task::as_select())
            .load::<Task>(conn)?;
        Ok(children.grouped_by(parents))
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_project: &NewProject,
    ) -> Result<Project, diesel::result::Error> {
        diesel::insert_into(crate::schema::projects::table)
            .values(new_project)
            .returning(Project::as_returning())
            .get_result(conn)
    }

    pub fn update_fields(
        conn: &mut PgConnection,
        project_id: uuid::Uuid,
        changes: &ProjectChanges,
    ) -> Result<Option<Project>, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        diesel::update(projects.filter(id.eq(project_id)))
            .set(changes)
            .returning(Project::as_returning())
            .get_result(conn)
            .optional()
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        project_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::projects::dsl::*;
        diesel::delete(projects.filter(id.eq(project_id))).execute(conn)
    }
}
