//! Item tag endpoints.

use axum::{extract::State, Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CATALOG_TAG;
use crate::api::dto::{CreateTagRequest, ErrorResponse, IdResponse, TagResponse};
use crate::api::middleware::require_admin;
use crate::db::TxContext;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{IdPath, ValidatedJson};

/// Routes mounted under `/tags`.
pub fn tag_routes(state: &AppState) -> OpenApiRouter<AppState> {
    let admin = OpenApiRouter::new()
        .routes(routes!(create_tag))
        .routes(routes!(delete_tag));

    OpenApiRouter::new()
        .routes(routes!(list_item_tags))
        .merge(require_admin(admin, state))
}

#[utoipa::path(
    post,
    path = "/create",
    tag = CATALOG_TAG,
    request_body = CreateTagRequest,
    responses(
        (status = 200, description = "Tag created", body = IdResponse),
        (status = 400, description = "Invalid body or duplicate tag", body = ErrorResponse),
        (status = 404, description = "Unknown item", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_tag(
    State(state): State<AppState>,
    ctx: TxContext,
    ValidatedJson(payload): ValidatedJson<CreateTagRequest>,
) -> AppResult<Json<IdResponse>> {
    let id = state.services.catalog.create_tag(&ctx, payload.into()).await?;
    Ok(Json(id.into()))
}

#[utoipa::path(
    get,
    path = "/item/{itemId}",
    tag = CATALOG_TAG,
    params(("itemId" = i32, Path, description = "Item id")),
    responses(
        (status = 200, description = "Tags of the item", body = [TagResponse]),
        (status = 400, description = "Invalid id", body = ErrorResponse)
    )
)]
async fn list_item_tags(
    State(state): State<AppState>,
    ctx: TxContext,
    IdPath(item_id): IdPath,
) -> AppResult<Json<Vec<TagResponse>>> {
    let tags = state.services.catalog.list_item_tags(&ctx, item_id).await?;
    Ok(Json(tags.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = CATALOG_TAG,
    params(("id" = i32, Path, description = "Tag id")),
    responses(
        (status = 200, description = "Tag deleted"),
        (status = 404, description = "No such tag", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_tag(
    State(state): State<AppState>,
    ctx: TxContext,
    IdPath(id): IdPath,
) -> AppResult<()> {
    state.services.catalog.delete_tag(&ctx, id).await
}
