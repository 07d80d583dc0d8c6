use bigdecimal::BigDecimal;
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

/// Delivery option row
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::deliveries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Delivery {
    pub id: i32,
    pub name: String,
    pub company_id: i32,
    pub price: BigDecimal,
}

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::delivery_companies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DeliveryCompany {
    pub id: i32,
    pub name: String,
}

/// Fields accepted when creating or updating a delivery.
///
/// `company_name` is normalised by the service before it reaches storage.
#[derive(Debug, Clone)]
pub struct DeliveryInput {
    pub name: String,
    pub company_name: String,
    pub price: BigDecimal,
}

/// Delivery joined with its company name
#[derive(Debug, Clone, PartialEq, Queryable, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryView {
    pub id: i32,
    #[schema(example = "express")]
    pub name: String,
    #[schema(example = "dhl")]
    pub company_name: String,
    #[schema(value_type = String, example = "5.00")]
    pub price: BigDecimal,
}
