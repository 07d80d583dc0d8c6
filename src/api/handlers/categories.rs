//! Category endpoints.

use axum::{extract::State, Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CATALOG_TAG;
use crate::api::dto::{CategoryResponse, CreateCategoryRequest, ErrorResponse, IdResponse};
use crate::api::middleware::require_admin;
use crate::db::TxContext;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{IdPath, ValidatedJson};

/// Routes mounted under `/categories`.
pub fn category_routes(state: &AppState) -> OpenApiRouter<AppState> {
    let admin = OpenApiRouter::new()
        .routes(routes!(create_category))
        .routes(routes!(delete_category));

    OpenApiRouter::new()
        .routes(routes!(list_categories))
        .merge(require_admin(admin, state))
}

#[utoipa::path(
    post,
    path = "/create",
    tag = CATALOG_TAG,
    request_body = CreateCategoryRequest,
    responses(
        (status = 200, description = "Category created", body = IdResponse),
        (status = 400, description = "Invalid body or duplicate name", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_category(
    State(state): State<AppState>,
    ctx: TxContext,
    ValidatedJson(payload): ValidatedJson<CreateCategoryRequest>,
) -> AppResult<Json<IdResponse>> {
    let id = state
        .services
        .catalog
        .create_category(&ctx, payload.into())
        .await?;
    Ok(Json(id.into()))
}

#[utoipa::path(
    get,
    path = "/all",
    tag = CATALOG_TAG,
    responses((status = 200, description = "All categories", body = [CategoryResponse]))
)]
async fn list_categories(
    State(state): State<AppState>,
    ctx: TxContext,
) -> AppResult<Json<Vec<CategoryResponse>>> {
    let categories = state.services.catalog.list_categories(&ctx).await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = CATALOG_TAG,
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "No such category", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_category(
    State(state): State<AppState>,
    ctx: TxContext,
    IdPath(id): IdPath,
) -> AppResult<()> {
    state.services.catalog.delete_category(&ctx, id).await
}
