use diesel::prelude::*;
use jiff_diesel::Timestamp;

/// User row
#[derive(Debug, Queryable, Selectable, Identifiable, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub login: String,
    pub email: String,
    pub password_hash: String,
    /// Set once the email address has been verified
    pub completed: bool,
    pub is_admin: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub login: String,
    pub email: String,
    pub password_hash: String,
}
