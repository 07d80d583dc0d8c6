//! User repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::{Database, TxContext};
use crate::error::AppResult;
use crate::models::{NewUser, User};
use crate::repositories::{db_error, transactional};

#[derive(Clone)]
pub struct UserRepository {
    db: Database,
}

transactional!(UserRepository);

impl UserRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Inserts a user. Duplicate login or email surfaces as `UniqueValue`.
    pub async fn create(&self, ctx: &TxContext, new_user: NewUser) -> AppResult<User> {
        use crate::schema::users::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::insert_into(users)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut *conn)
            .await
            .map_err(db_error("insert user"))
    }

    pub async fn find_by_id(&self, ctx: &TxContext, user_id: i32) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        users
            .filter(id.eq(user_id))
            .select(User::as_select())
            .first(&mut *conn)
            .await
            .optional()
            .map_err(db_error("find user by id"))
    }

    pub async fn find_by_login(&self, ctx: &TxContext, user_login: &str) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        users
            .filter(login.eq(user_login))
            .select(User::as_select())
            .first(&mut *conn)
            .await
            .optional()
            .map_err(db_error("find user by login"))
    }

    /// Marks the user's email as verified. Returns the affected row count.
    pub async fn set_completed(&self, ctx: &TxContext, user_id: i32) -> AppResult<usize> {
        use crate::schema::users::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::update(users.filter(id.eq(user_id)))
            .set(completed.eq(true))
            .execute(&mut *conn)
            .await
            .map_err(db_error("complete user"))
    }
}
