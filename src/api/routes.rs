//! Router assembly.
//!
//! Resource routers are nested under `/api/v1`; health probes, the OpenAPI
//! document and Swagger UI live at the root.

use std::time::Duration;

use axum::{
    http::{HeaderValue, StatusCode},
    middleware, Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers::{
    auth, categories, colors, delivery, health, items, orders, payment_methods, tags, users,
};
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::config::ServerConfig;
use crate::state::AppState;

pub const API_PREFIX: &str = "/api/v1";

/// Builds the application router with every route and middleware layer.
///
/// Layers run outermost first: request id, access log, error shaping,
/// CORS, compression, then the request timeout.
pub fn create_router(state: AppState) -> Router {
    let api = OpenApiRouter::new()
        .nest("/auth", auth::auth_routes())
        .nest("/users", users::user_routes(&state))
        .nest("/categories", categories::category_routes(&state))
        .nest("/colors", colors::color_routes(&state))
        .nest("/items", items::item_routes(&state))
        .nest("/tags", tags::tag_routes(&state))
        .nest("/payment-methods", payment_methods::payment_method_routes(&state))
        .nest("/orders", orders::order_routes(&state))
        .nest("/delivery", delivery::delivery_routes(&state));

    let (router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest(API_PREFIX, api)
        .merge(health::health_routes())
        .split_for_parts();

    let server = &state.settings.server;

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout),
        ))
        .layer(CompressionLayer::new())
        .layer(cors_layer(server))
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let layer = if server.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };
    layer.allow_methods(Any).allow_headers(Any)
}
