//! Order rows and the enriched order composed by the service layer.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::DeliveryView;

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub delivery_id: i32,
    pub status_id: i32,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

/// Insert shape; `status_id` and `created_at` take column defaults
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder {
    pub user_id: i32,
    pub delivery_id: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::order_lines)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderLine {
    pub id: i32,
    pub order_id: i32,
    pub item_id: i32,
    pub color_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::order_lines)]
pub struct NewOrderLine {
    pub order_id: i32,
    pub item_id: i32,
    pub color_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::statuses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Status {
    pub id: i32,
    pub name: String,
}

/// One requested line of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub item_id: i32,
    pub color_id: i32,
    pub quantity: i32,
}

impl From<OrderLine> for OrderItem {
    fn from(line: OrderLine) -> Self {
        Self {
            item_id: line.item_id,
            color_id: line.color_id,
            quantity: line.quantity,
        }
    }
}

/// Input to order placement
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub delivery_id: i32,
    pub comment: Option<String>,
    pub items: Vec<OrderItem>,
}

/// Order joined with its lines, delivery and status name
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedOrder {
    pub id: i32,
    /// Status name
    #[schema(example = "created")]
    pub status: String,
    pub user_id: i32,
    pub comment: Option<String>,
    /// Lines in insertion order
    pub items: Vec<OrderItem>,
    pub delivery: DeliveryView,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
}
