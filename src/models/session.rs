use diesel::prelude::*;
use jiff_diesel::Timestamp;

/// Refresh-token session; valid while `expires_at` is in the future
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Session {
    pub id: i32,
    pub user_id: i32,
    pub refresh_token: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession {
    pub user_id: i32,
    pub refresh_token: String,
    pub expires_at: Timestamp,
}
