//! Delivery option endpoints.

use axum::{extract::State, Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::DELIVERY_TAG;
use crate::api::dto::{DeliveryRequest, ErrorResponse, IdResponse};
use crate::api::middleware::require_admin;
use crate::db::TxContext;
use crate::error::AppResult;
use crate::models::DeliveryView;
use crate::state::AppState;
use crate::utils::validate::{IdPath, ValidatedJson};

/// Routes mounted under `/delivery`. Reads are public.
pub fn delivery_routes(state: &AppState) -> OpenApiRouter<AppState> {
    let admin = OpenApiRouter::new()
        .routes(routes!(create_delivery))
        .routes(routes!(update_delivery, delete_delivery));

    OpenApiRouter::new()
        .routes(routes!(list_deliveries))
        .routes(routes!(get_delivery))
        .merge(require_admin(admin, state))
}

/// Creates the delivery company on first use.
#[utoipa::path(
    post,
    path = "/create",
    tag = DELIVERY_TAG,
    request_body = DeliveryRequest,
    responses(
        (status = 200, description = "Delivery created", body = IdResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_delivery(
    State(state): State<AppState>,
    ctx: TxContext,
    ValidatedJson(payload): ValidatedJson<DeliveryRequest>,
) -> AppResult<Json<IdResponse>> {
    let id = state.services.delivery.create(&ctx, payload.into()).await?;
    Ok(Json(id.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = DELIVERY_TAG,
    params(("id" = i32, Path, description = "Delivery id")),
    request_body = DeliveryRequest,
    responses(
        (status = 200, description = "Delivery updated"),
        (status = 400, description = "Invalid id or body", body = ErrorResponse),
        (status = 404, description = "No such delivery", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn update_delivery(
    State(state): State<AppState>,
    ctx: TxContext,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<DeliveryRequest>,
) -> AppResult<()> {
    state.services.delivery.update(&ctx, id, payload.into()).await
}

/// Succeeds whether or not the delivery exists.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = DELIVERY_TAG,
    params(("id" = i32, Path, description = "Delivery id")),
    responses(
        (status = 200, description = "Delivery deleted"),
        (status = 400, description = "Invalid id or delivery used by an order", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_delivery(
    State(state): State<AppState>,
    ctx: TxContext,
    IdPath(id): IdPath,
) -> AppResult<()> {
    state.services.delivery.delete(&ctx, id).await
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = DELIVERY_TAG,
    params(("id" = i32, Path, description = "Delivery id")),
    responses(
        (status = 200, description = "Delivery", body = DeliveryView),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "No such delivery", body = ErrorResponse)
    )
)]
async fn get_delivery(
    State(state): State<AppState>,
    ctx: TxContext,
    IdPath(id): IdPath,
) -> AppResult<Json<DeliveryView>> {
    Ok(Json(state.services.delivery.get_by_id(&ctx, id).await?))
}

#[utoipa::path(
    get,
    path = "/all",
    tag = DELIVERY_TAG,
    responses((status = 200, description = "All deliveries", body = [DeliveryView]))
)]
async fn list_deliveries(
    State(state): State<AppState>,
    ctx: TxContext,
) -> AppResult<Json<Vec<DeliveryView>>> {
    Ok(Json(state.services.delivery.get_all(&ctx).await?))
}
