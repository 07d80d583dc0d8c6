//! Color endpoints.

use axum::{extract::State, Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CATALOG_TAG;
use crate::api::dto::{ColorResponse, CreateColorRequest, ErrorResponse, IdResponse};
use crate::api::middleware::require_admin;
use crate::db::TxContext;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{IdPath, ValidatedJson};

/// Routes mounted under `/colors`.
pub fn color_routes(state: &AppState) -> OpenApiRouter<AppState> {
    let admin = OpenApiRouter::new()
        .routes(routes!(create_color))
        .routes(routes!(delete_color));

    OpenApiRouter::new()
        .routes(routes!(list_colors))
        .merge(require_admin(admin, state))
}

#[utoipa::path(
    post,
    path = "/create",
    tag = CATALOG_TAG,
    request_body = CreateColorRequest,
    responses(
        (status = 200, description = "Color created", body = IdResponse),
        (status = 400, description = "Invalid body or duplicate name", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_color(
    State(state): State<AppState>,
    ctx: TxContext,
    ValidatedJson(payload): ValidatedJson<CreateColorRequest>,
) -> AppResult<Json<IdResponse>> {
    let id = state
        .services
        .catalog
        .create_color(&ctx, payload.into())
        .await?;
    Ok(Json(id.into()))
}

#[utoipa::path(
    get,
    path = "/all",
    tag = CATALOG_TAG,
    responses((status = 200, description = "All colors", body = [ColorResponse]))
)]
async fn list_colors(
    State(state): State<AppState>,
    ctx: TxContext,
) -> AppResult<Json<Vec<ColorResponse>>> {
    let colors = state.services.catalog.list_colors(&ctx).await?;
    Ok(Json(colors.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = CATALOG_TAG,
    params(("id" = i32, Path, description = "Color id")),
    responses(
        (status = 200, description = "Color deleted"),
        (status = 400, description = "Color is referenced by an order", body = ErrorResponse),
        (status = 404, description = "No such color", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_color(
    State(state): State<AppState>,
    ctx: TxContext,
    IdPath(id): IdPath,
) -> AppResult<()> {
    state.services.catalog.delete_color(&ctx, id).await
}
