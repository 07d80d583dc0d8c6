//! Payment method endpoints.

use axum::{extract::State, Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CATALOG_TAG;
use crate::api::dto::{
    CreatePaymentMethodRequest, ErrorResponse, IdResponse, PaymentMethodResponse,
    SetPaymentMethodActiveRequest,
};
use crate::api::middleware::require_admin;
use crate::db::TxContext;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{IdPath, ValidatedJson};

/// Routes mounted under `/payment-methods`.
pub fn payment_method_routes(state: &AppState) -> OpenApiRouter<AppState> {
    let admin = OpenApiRouter::new()
        .routes(routes!(create_payment_method))
        .routes(routes!(set_payment_method_active));

    OpenApiRouter::new()
        .routes(routes!(list_payment_methods))
        .merge(require_admin(admin, state))
}

#[utoipa::path(
    post,
    path = "/create",
    tag = CATALOG_TAG,
    request_body = CreatePaymentMethodRequest,
    responses(
        (status = 200, description = "Payment method created", body = IdResponse),
        (status = 400, description = "Invalid body or duplicate name", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_payment_method(
    State(state): State<AppState>,
    ctx: TxContext,
    ValidatedJson(payload): ValidatedJson<CreatePaymentMethodRequest>,
) -> AppResult<Json<IdResponse>> {
    let id = state
        .services
        .catalog
        .create_payment_method(&ctx, payload.into())
        .await?;
    Ok(Json(id.into()))
}

#[utoipa::path(
    get,
    path = "/all",
    tag = CATALOG_TAG,
    responses((status = 200, description = "All payment methods", body = [PaymentMethodResponse]))
)]
async fn list_payment_methods(
    State(state): State<AppState>,
    ctx: TxContext,
) -> AppResult<Json<Vec<PaymentMethodResponse>>> {
    let methods = state.services.catalog.list_payment_methods(&ctx).await?;
    Ok(Json(methods.into_iter().map(Into::into).collect()))
}

/// Enables or disables a payment method.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = CATALOG_TAG,
    params(("id" = i32, Path, description = "Payment method id")),
    request_body = SetPaymentMethodActiveRequest,
    responses(
        (status = 200, description = "Payment method updated"),
        (status = 404, description = "No such payment method", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn set_payment_method_active(
    State(state): State<AppState>,
    ctx: TxContext,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<SetPaymentMethodActiveRequest>,
) -> AppResult<()> {
    state
        .services
        .catalog
        .set_payment_method_active(&ctx, id, payload.active)
        .await
}
