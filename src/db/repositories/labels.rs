use diesel::prelude::*;

use crate::db::models::label::{Label, NewLabel, TaskLabel};

pub struct LabelRepo;

impl LabelRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_label: &NewLabel,
    ) -> Result<Label, diesel::result::Error> {
        diesel::insert_into(crate::schema::labels::table)
            .values(new_label)
            .returning(Label::as_returning())
            .get_result(conn)
    }

    pub fn list_by_project(
        conn: &mut PgConnection,
        target_project_id: uuid::Uuid,
    ) -> Result<Vec<Label>, diesel::result::Error> {
        use crate::schema::labels::dsl::*;
        labels
            .filter(project_id.eq(target_project_id))
            .order((name.asc(), id.asc()))
            .select(Label::as_select())
            .load::<Label>(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        label_id: uuid::Uuid,
    ) -> Result<Option<Label>, diesel::result::Error> {
        use crate::schema::labels::dsl::*;
        labels
            .filter(id.eq(label_id))
            .select(Label::as_select())
            .first::<Label>(conn)
            .optional()
    }

    pub fn list_by_task(
        conn: &mut PgConnection,
        target_task_id: uuid::Uuid,
    ) -> Result<Vec<Label>, diesel::result::Error> {
        use crate::schema::{labels, task_labels};
        task_labels::table
            .inner_join(labels::table)
            .filter(task_labels::task_id.eq(target_task_id))
            .order((labels::name.asc(), labels::id.asc()))
            .select(Label::as_select())
            .load::<Label>(conn)
    }

    pub fn attach(
        conn: &mut PgConnection,
        link: &TaskLabel,
    ) -> Result<usize, diesel::result::Error> {
        diesel::insert_into(crate::schema::task_labels::table)
            .values(link)
            .on_conflict_do_nothing()
            .execute(conn)
    }

    pub fn detach(
        conn: &mut PgConnection,
        link: &TaskLabel,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::task_labels::dsl::*;
        diesel::delete(
            task_labels
                .filter(task_id.eq(link.task_id))
                .filter(label_id.eq(link.label_id)),
        )
        .execute(conn)
    }
}
