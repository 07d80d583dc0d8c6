use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const AUTH_TAG: &str = "Auth";
pub const USER_TAG: &str = "User";
pub const CATALOG_TAG: &str = "Catalog";
pub const DELIVERY_TAG: &str = "Delivery";
pub const ORDER_TAG: &str = "Orders";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront",
        description = "Storefront API: catalog, accounts, delivery options and orders",
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::IdResponse,
            crate::models::OrderItem,
        )
    ),
    tags(
        (name = AUTH_TAG, description = "Registration, login and token refresh"),
        (name = USER_TAG, description = "Current user"),
        (name = CATALOG_TAG, description = "Categories, colors, items, tags and payment methods"),
        (name = DELIVERY_TAG, description = "Delivery options"),
        (name = ORDER_TAG, description = "Order placement and administration"),
        (name = HEALTH_TAG, description = "Health probes"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /api/v1/auth/login"))
                        .build(),
                ),
            )
        }
    }
}
