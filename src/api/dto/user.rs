use serde::Serialize;
use utoipa::ToSchema;

use crate::models::User;

/// Public view of a user (no password hash)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    #[schema(example = "john_doe")]
    pub login: String,
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Email verified
    pub completed: bool,
    pub is_admin: bool,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            login: user.login,
            email: user.email,
            completed: user.completed,
            is_admin: user.is_admin,
            created_at: user.created_at.to_jiff(),
        }
    }
}
