//! Current user endpoint.

use axum::{extract::State, Extension, Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::USER_TAG;
use crate::api::dto::{ErrorResponse, UserResponse};
use crate::api::middleware::{require_auth, AuthUser};
use crate::db::TxContext;
use crate::error::AppResult;
use crate::state::AppState;

/// Routes mounted under `/users`.
pub fn user_routes(state: &AppState) -> OpenApiRouter<AppState> {
    require_auth(OpenApiRouter::new().routes(routes!(get_me)), state)
}

#[utoipa::path(
    get,
    path = "/me",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_me(
    State(state): State<AppState>,
    ctx: TxContext,
    Extension(auth): Extension<AuthUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.get_user(&ctx, auth.user_id).await?;
    Ok(Json(UserResponse::from(user)))
}
