use diesel::prelude::*;

use crate::db::models::comment::{Comment, NewComment};
use crate::db::models::user::UserSummary;

pub struct CommentRepo;

impl CommentRepo {
    pub fn list_by_task(
        conn: &mut PgConnection,
        target_task_id: uuid::Uuid,
    ) -> Result<Vec<(Comment, UserSummary)>, diesel::result::Error> {
        use crate::schema::{comments, users};
        comments::table
            .inner_join(users::table)
            .filter(comments::task_id.eq(target_task_id))
            .order((comments::created_at.asc(), comments::id.asc()))
            .select((Comment::as_select(), UserSummary::as_select()))
            .load::<(Comment, UserSummary)>(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_comment: &NewComment,
    ) -> Result<Comment, diesel::result::Error> {
        diesel::insert_into(crate::schema::comments::table)
            .values(new_comment)
            .returning(Comment::as_returning())
            .get_result(conn)
    }
}
