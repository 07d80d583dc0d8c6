use diesel::dsl::now;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::{Database, TxContext};
use crate::error::AppResult;
use crate::models::{NewSession, Session};
use crate::repositories::{db_error, transactional};

/// Refresh-token sessions.
#[derive(Clone)]
pub struct SessionRepository {
    db: Database,
}

transactional!(SessionRepository);

impl SessionRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create(&self, ctx: &TxContext, new_session: NewSession) -> AppResult<Session> {
        use crate::schema::sessions::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::insert_into(sessions)
            .values(&new_session)
            .returning(Session::as_returning())
            .get_result(&mut *conn)
            .await
            .map_err(db_error("insert session"))
    }

    /// Finds the session for `token` whose expiry is still in the future.
    pub async fn find_valid(&self, ctx: &TxContext, token: &str) -> AppResult<Option<Session>> {
        use crate::schema::sessions::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        sessions
            .filter(refresh_token.eq(token))
            .filter(expires_at.gt(now))
            .select(Session::as_select())
            .first(&mut *conn)
            .await
            .optional()
            .map_err(db_error("find session"))
    }

    pub async fn delete_by_token(&self, ctx: &TxContext, token: &str) -> AppResult<usize> {
        use crate::schema::sessions::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::delete(sessions.filter(refresh_token.eq(token)))
            .execute(&mut *conn)
            .await
            .map_err(db_error("delete session"))
    }
}
