//! Data Transfer Objects for API requests and responses.
//!
//! All bodies use camelCase field names.

mod auth;
mod catalog;
mod delivery;
mod error;
mod health;
mod order;
mod user;

pub use auth::{LoginRequest, RefreshTokenRequest, RegisterRequest, TokenResponse};
pub use catalog::{
    AddItemColorRequest, CategoryResponse, ColorResponse, CreateCategoryRequest,
    CreateColorRequest, CreateItemRequest, CreatePaymentMethodRequest, CreateTagRequest,
    ItemResponse, PaymentMethodResponse, SetPaymentMethodActiveRequest, TagResponse,
};
pub use delivery::DeliveryRequest;
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use order::{CreateOrderRequest, OrderItemRequest, UpdateOrderStatusRequest};
pub use user::UserResponse;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Id of a newly created resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IdResponse {
    #[schema(example = 1)]
    pub id: i32,
}

impl From<i32> for IdResponse {
    fn from(id: i32) -> Self {
        Self { id }
    }
}

pub(crate) mod rules {
    //! Custom `validator` rules shared by request bodies.

    use bigdecimal::BigDecimal;
    use validator::ValidationError;

    pub fn non_negative(value: &BigDecimal) -> Result<(), ValidationError> {
        if *value < BigDecimal::from(0) {
            return Err(ValidationError::new("non_negative")
                .with_message("must not be negative".into()));
        }
        Ok(())
    }

    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank").with_message("must not be blank".into()));
        }
        Ok(())
    }

    /// `#rrggbb`
    pub fn hex_color(value: &str) -> Result<(), ValidationError> {
        let valid = value.len() == 7
            && value.starts_with('#')
            && value[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(ValidationError::new("hex_color")
                .with_message("must be a color like #a1b2c3".into()));
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::str::FromStr;

        #[test]
        fn test_non_negative() {
            assert!(non_negative(&BigDecimal::from_str("0").unwrap()).is_ok());
            assert!(non_negative(&BigDecimal::from_str("5.00").unwrap()).is_ok());
            assert!(non_negative(&BigDecimal::from_str("-0.01").unwrap()).is_err());
        }

        #[test]
        fn test_not_blank() {
            assert!(not_blank(" dhl ").is_ok());
            assert!(not_blank("   ").is_err());
        }

        #[test]
        fn test_hex_color() {
            assert!(hex_color("#A1b2C3").is_ok());
            assert!(hex_color("a1b2c3").is_err());
            assert!(hex_color("#a1b2c").is_err());
            assert!(hex_color("#a1b2cz").is_err());
        }
    }
}
