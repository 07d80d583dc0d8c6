//! Registration, login and token lifecycle.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{
    ErrorResponse, IdResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, TokenResponse,
};
use crate::db::TxContext;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Routes mounted under `/auth`. None of them require a token.
pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(register))
        .routes(routes!(login))
        .routes(routes!(refresh))
        .routes(routes!(logout))
        .routes(routes!(verify_email))
}

/// Creates an unverified account and mails the verification link.
#[utoipa::path(
    post,
    path = "/register",
    tag = AUTH_TAG,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = IdResponse),
        (status = 400, description = "Invalid body or login/email already taken", body = ErrorResponse)
    )
)]
async fn register(
    State(state): State<AppState>,
    ctx: TxContext,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<IdResponse>)> {
    let id = state.services.users.register(&ctx, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(IdResponse::from(id))))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
async fn login(
    State(state): State<AppState>,
    ctx: TxContext,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let tokens = state
        .services
        .users
        .login(&ctx, &payload.login, &payload.password)
        .await?;
    Ok(Json(tokens.into()))
}

/// Rotates the session behind a refresh token.
#[utoipa::path(
    post,
    path = "/refresh",
    tag = AUTH_TAG,
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Tokens refreshed", body = TokenResponse),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorResponse)
    )
)]
async fn refresh(
    State(state): State<AppState>,
    ctx: TxContext,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let tokens = state
        .services
        .users
        .refresh(&ctx, &payload.refresh_token)
        .await?;
    Ok(Json(tokens.into()))
}

#[utoipa::path(
    post,
    path = "/logout",
    tag = AUTH_TAG,
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Session closed")
    )
)]
async fn logout(
    State(state): State<AppState>,
    ctx: TxContext,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> AppResult<StatusCode> {
    state
        .services
        .users
        .logout(&ctx, &payload.refresh_token)
        .await?;
    Ok(StatusCode::OK)
}

/// Target of the link sent by mail.
#[utoipa::path(
    get,
    path = "/verify/{token}",
    tag = AUTH_TAG,
    params(("token" = String, Path, description = "Verification token from the email")),
    responses(
        (status = 200, description = "Email verified"),
        (status = 400, description = "Unknown or expired token", body = ErrorResponse)
    )
)]
async fn verify_email(
    State(state): State<AppState>,
    ctx: TxContext,
    Path(token): Path<String>,
) -> AppResult<StatusCode> {
    state.services.users.verify_email(&ctx, &token).await?;
    Ok(StatusCode::OK)
}
