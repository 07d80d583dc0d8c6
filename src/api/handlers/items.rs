//! Item endpoints, including the colors an item is offered in.

use axum::{extract::State, Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CATALOG_TAG;
use crate::api::dto::{
    AddItemColorRequest, ColorResponse, CreateItemRequest, ErrorResponse, IdResponse, ItemResponse,
};
use crate::api::middleware::require_admin;
use crate::db::TxContext;
use crate::error::AppResult;
use crate::models::ItemColor;
use crate::state::AppState;
use crate::utils::validate::{IdPath, ValidatedJson};

/// Routes mounted under `/items`.
pub fn item_routes(state: &AppState) -> OpenApiRouter<AppState> {
    let admin = OpenApiRouter::new()
        .routes(routes!(create_item))
        .routes(routes!(delete_item))
        .routes(routes!(add_item_color));

    OpenApiRouter::new()
        .routes(routes!(list_items))
        .routes(routes!(get_item))
        .routes(routes!(list_item_colors))
        .merge(require_admin(admin, state))
}

#[utoipa::path(
    post,
    path = "/create",
    tag = CATALOG_TAG,
    request_body = CreateItemRequest,
    responses(
        (status = 200, description = "Item created", body = IdResponse),
        (status = 400, description = "Invalid body or duplicate sku", body = ErrorResponse),
        (status = 404, description = "Unknown category", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_item(
    State(state): State<AppState>,
    ctx: TxContext,
    ValidatedJson(payload): ValidatedJson<CreateItemRequest>,
) -> AppResult<Json<IdResponse>> {
    let id = state
        .services
        .catalog
        .create_item(&ctx, payload.into())
        .await?;
    Ok(Json(id.into()))
}

/// Newest first.
#[utoipa::path(
    get,
    path = "/all",
    tag = CATALOG_TAG,
    responses((status = 200, description = "All items", body = [ItemResponse]))
)]
async fn list_items(
    State(state): State<AppState>,
    ctx: TxContext,
) -> AppResult<Json<Vec<ItemResponse>>> {
    let items = state.services.catalog.list_items(&ctx).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = CATALOG_TAG,
    params(("id" = i32, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item", body = ItemResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "No such item", body = ErrorResponse)
    )
)]
async fn get_item(
    State(state): State<AppState>,
    ctx: TxContext,
    IdPath(id): IdPath,
) -> AppResult<Json<ItemResponse>> {
    let item = state.services.catalog.get_item(&ctx, id).await?;
    Ok(Json(item.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = CATALOG_TAG,
    params(("id" = i32, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item deleted"),
        (status = 400, description = "Item is referenced by an order", body = ErrorResponse),
        (status = 404, description = "No such item", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_item(
    State(state): State<AppState>,
    ctx: TxContext,
    IdPath(id): IdPath,
) -> AppResult<()> {
    state.services.catalog.delete_item(&ctx, id).await
}

/// Offers the item in one more color. Linking twice is a no-op.
#[utoipa::path(
    post,
    path = "/{id}/colors",
    tag = CATALOG_TAG,
    params(("id" = i32, Path, description = "Item id")),
    request_body = AddItemColorRequest,
    responses(
        (status = 200, description = "Color linked"),
        (status = 404, description = "Unknown item or color", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn add_item_color(
    State(state): State<AppState>,
    ctx: TxContext,
    IdPath(item_id): IdPath,
    ValidatedJson(payload): ValidatedJson<AddItemColorRequest>,
) -> AppResult<()> {
    let link = ItemColor {
        item_id,
        color_id: payload.color_id,
    };
    state.services.catalog.add_item_color(&ctx, link).await
}

#[utoipa::path(
    get,
    path = "/{id}/colors",
    tag = CATALOG_TAG,
    params(("id" = i32, Path, description = "Item id")),
    responses(
        (status = 200, description = "Colors the item is offered in", body = [ColorResponse]),
        (status = 404, description = "No such item", body = ErrorResponse)
    )
)]
async fn list_item_colors(
    State(state): State<AppState>,
    ctx: TxContext,
    IdPath(item_id): IdPath,
) -> AppResult<Json<Vec<ColorResponse>>> {
    let colors = state.services.catalog.list_item_colors(&ctx, item_id).await?;
    Ok(Json(colors.into_iter().map(Into::into).collect()))
}
