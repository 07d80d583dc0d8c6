use bigdecimal::BigDecimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::rules;
use crate::models::DeliveryInput;

/// Body for creating or replacing a delivery option
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRequest {
    #[validate(length(min = 1, max = 30, message = "name must be between 1 and 30 characters"))]
    #[schema(example = "express", min_length = 1, max_length = 30)]
    pub name: String,
    /// Matched case-insensitively; created when unknown
    #[validate(
        length(min = 1, max = 30, message = "companyName must be between 1 and 30 characters"),
        custom(function = "rules::not_blank")
    )]
    #[schema(example = "DHL", min_length = 1, max_length = 30)]
    pub company_name: String,
    #[validate(custom(function = "rules::non_negative"))]
    #[schema(value_type = String, example = "5.00")]
    pub price: BigDecimal,
}

impl From<DeliveryRequest> for DeliveryInput {
    fn from(req: DeliveryRequest) -> Self {
        Self {
            name: req.name,
            company_name: req.company_name,
            price: req.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_string_and_number_prices() {
        let req: DeliveryRequest =
            serde_json::from_str(r#"{"name":"express","companyName":"  DHL ","price":"5.00"}"#).unwrap();
        assert!(req.validate().is_ok());

        let req: DeliveryRequest =
            serde_json::from_str(r#"{"name":"express","companyName":"dhl","price":5}"#).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn rejects_negative_price_and_blank_company() {
        let req: DeliveryRequest =
            serde_json::from_str(r#"{"name":"express","companyName":"   ","price":"-1"}"#).unwrap();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("company_name"));
    }

    #[test]
    fn rejects_long_name() {
        let req = DeliveryRequest {
            name: "x".repeat(31),
            company_name: "dhl".to_string(),
            price: BigDecimal::from(1),
        };
        assert!(req.validate().is_err());
    }
}
