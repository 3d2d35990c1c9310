use diesel::prelude::*;

use crate::db::models::user::{NewUser, User, UserSummary};

pub struct UserRepo;

impl UserRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        user_id: uuid::Uuid,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(id.eq(user_id))
            .select(User::as_select())
            .first::<User>(conn)
            .optional()
    }

    pub fn find_by_email(
        conn: &mut PgConnection,
        user_email: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(email.eq(user_email))
            .select(User::as_select())
            .first::<User>(conn)
            .optional()
    }

    pub fn find_summary(
        conn: &mut PgConnection,
        user_id: uuid::Uuid,
    ) -> Result<Option<UserSummary>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(id.eq(user_id))
            .select(UserSummary::as_select())
            .first::<UserSummary>(conn)
            .optional()
    }

    pub fn list_summaries(
        conn: &mut PgConnection,
        user_ids: &[uuid::Uuid],
    ) -> Result<Vec<UserSummary>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        users
            .filter(id.eq_any(user_ids))
            .select(UserSummary::as_select())
            .load::<UserSummary>(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_user: &NewUser,
    ) -> Result<User, diesel::result::Error> {
        diesel::insert_into(crate::schema::users::table)
            .values(new_user)
            .returning(User::as_returning())
            .get_result(conn)
    }

    pub fn count(conn: &mut PgConnection) -> Result<i64, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users.count().get_result(conn)
    }
}
