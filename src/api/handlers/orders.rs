//! Order placement and administration.
//!
//! Placing an order needs a verified account, listing one's own orders
//! needs a token, everything else is admin only.

use axum::{extract::State, http::StatusCode, Extension, Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::ORDER_TAG;
use crate::api::dto::{CreateOrderRequest, ErrorResponse, IdResponse, UpdateOrderStatusRequest};
use crate::api::middleware::{require_admin, require_auth, require_completed, AuthUser};
use crate::db::TxContext;
use crate::error::AppResult;
use crate::models::EnrichedOrder;
use crate::state::AppState;
use crate::utils::validate::{IdPath, ValidatedJson};

/// Routes mounted under `/orders`.
pub fn order_routes(state: &AppState) -> OpenApiRouter<AppState> {
    let verified = OpenApiRouter::new().routes(routes!(create_order));
    let authenticated = OpenApiRouter::new().routes(routes!(list_my_orders));
    let admin = OpenApiRouter::new()
        .routes(routes!(list_orders))
        .routes(routes!(get_order, update_order_status, delete_order));

    require_completed(verified, state)
        .merge(require_auth(authenticated, state))
        .merge(require_admin(admin, state))
}

#[utoipa::path(
    post,
    path = "/create",
    tag = ORDER_TAG,
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = IdResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 403, description = "Email not verified", body = ErrorResponse),
        (status = 404, description = "Unknown delivery, item or color", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_order(
    State(state): State<AppState>,
    ctx: TxContext,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<IdResponse>)> {
    let id = state
        .services
        .orders
        .create(&ctx, auth.user_id, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(id.into())))
}

/// Orders of the caller, newest first.
#[utoipa::path(
    get,
    path = "/me/all",
    tag = ORDER_TAG,
    responses((status = 200, description = "Caller's orders", body = [EnrichedOrder])),
    security(("bearerAuth" = []))
)]
async fn list_my_orders(
    State(state): State<AppState>,
    ctx: TxContext,
    Extension(auth): Extension<AuthUser>,
) -> AppResult<Json<Vec<EnrichedOrder>>> {
    let orders = state
        .services
        .orders
        .get_all_by_user_id(&ctx, auth.user_id)
        .await?;
    Ok(Json(orders))
}

#[utoipa::path(
    get,
    path = "/all",
    tag = ORDER_TAG,
    responses((status = 200, description = "All orders, newest first", body = [EnrichedOrder])),
    security(("bearerAuth" = []))
)]
async fn list_orders(
    State(state): State<AppState>,
    ctx: TxContext,
) -> AppResult<Json<Vec<EnrichedOrder>>> {
    Ok(Json(state.services.orders.get_all(&ctx).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order", body = EnrichedOrder),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "No such order", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_order(
    State(state): State<AppState>,
    ctx: TxContext,
    IdPath(id): IdPath,
) -> AppResult<Json<EnrichedOrder>> {
    Ok(Json(state.services.orders.get_by_id(&ctx, id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order id")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status changed"),
        (status = 400, description = "Invalid id or body", body = ErrorResponse),
        (status = 404, description = "Unknown order or status", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn update_order_status(
    State(state): State<AppState>,
    ctx: TxContext,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<UpdateOrderStatusRequest>,
) -> AppResult<()> {
    state
        .services
        .orders
        .update_status(&ctx, id, payload.status_id)
        .await
}

/// Deletes the order together with its lines.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order deleted"),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "No such order", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_order(
    State(state): State<AppState>,
    ctx: TxContext,
    IdPath(id): IdPath,
) -> AppResult<()> {
    state.services.orders.delete(&ctx, id).await
}
