//! Identity middleware.
//!
//! `auth_middleware` resolves the bearer token into an [`AuthUser`]
//! extension. `admin_middleware` and `completed_middleware` load that user
//! and check a flag, so they must run after it.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::{self, Next},
    response::Response,
};
use utoipa_axum::router::OpenApiRouter;

use crate::db::TxContext;
use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::state::AppState;

/// Authenticated caller, added to request extensions by `auth_middleware`.
///
/// Handlers extract it with `Extension<AuthUser>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i32,
}

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(value: Option<&str>) -> AppResult<&str> {
    let value = value.ok_or_else(|| AppError::not_authenticated("missing authorization header"))?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AppError::not_authenticated("invalid authorization header, expected: Bearer <token>")
        })
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());
    let token = bearer_token(header)?;
    let user_id = state.services.users.authenticate(token)?;

    request.extensions_mut().insert(AuthUser { user_id });
    Ok(next.run(request).await)
}

/// Requires the caller to be an administrator.
pub async fn admin_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth = request.extensions().get::<AuthUser>().copied();
    let user = current_user(&state, auth).await?;
    if !user.is_admin {
        tracing::debug!(user_id = user.id, "Rejected non-admin caller");
        return Err(AppError::not_authorized("admin access required"));
    }
    Ok(next.run(request).await)
}

/// Requires the caller to have verified their email.
pub async fn completed_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth = request.extensions().get::<AuthUser>().copied();
    let user = current_user(&state, auth).await?;
    if !user.completed {
        return Err(AppError::UserNotCompleted);
    }
    Ok(next.run(request).await)
}

async fn current_user(state: &AppState, auth: Option<AuthUser>) -> AppResult<User> {
    let auth = auth.ok_or_else(|| AppError::not_authenticated("authentication required"))?;

    match state.services.users.get_user(&TxContext::new(), auth.user_id).await {
        Ok(user) => Ok(user),
        // A valid token for a deleted account
        Err(AppError::IdNotFound { .. }) => Err(AppError::not_authenticated("unknown user")),
        Err(err) => Err(err),
    }
}

// route_layer: the last layer added runs first.

/// Guards every route of `router` with `auth_middleware`.
pub fn require_auth(router: OpenApiRouter<AppState>, state: &AppState) -> OpenApiRouter<AppState> {
    router.route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
}

/// Authenticated callers with a verified email.
pub fn require_completed(router: OpenApiRouter<AppState>, state: &AppState) -> OpenApiRouter<AppState> {
    let router = router.route_layer(middleware::from_fn_with_state(
        state.clone(),
        completed_middleware,
    ));
    require_auth(router, state)
}

/// Authenticated administrators.
pub fn require_admin(router: OpenApiRouter<AppState>, state: &AppState) -> OpenApiRouter<AppState> {
    let router =
        router.route_layer(middleware::from_fn_with_state(state.clone(), admin_middleware));
    require_auth(router, state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_extracts_token() {
        assert_eq!(bearer_token(Some("Bearer abc.def")).unwrap(), "abc.def");
    }

    #[test]
    fn bearer_token_rejects_missing_or_malformed_header() {
        assert!(matches!(
            bearer_token(None),
            Err(AppError::NotAuthenticated { .. })
        ));
        assert!(matches!(
            bearer_token(Some("Basic dXNlcjpwYXNz")),
            Err(AppError::NotAuthenticated { .. })
        ));
        assert!(matches!(
            bearer_token(Some("Bearer   ")),
            Err(AppError::NotAuthenticated { .. })
        ));
    }
}
