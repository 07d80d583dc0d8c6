//! Order request bodies.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{CreateOrder, OrderItem};

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    #[validate(range(min = 1, message = "itemId must be a positive integer"))]
    #[schema(example = 11)]
    pub item_id: i32,
    #[validate(range(min = 1, message = "colorId must be a positive integer"))]
    #[schema(example = 3)]
    pub color_id: i32,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    #[schema(example = 2, minimum = 1)]
    pub quantity: i32,
}

/// Cart submitted for order placement
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Must not be empty
    #[validate(nested)]
    pub items: Vec<OrderItemRequest>,
    #[validate(range(min = 1, message = "deliveryId must be a positive integer"))]
    #[schema(example = 7)]
    pub delivery_id: i32,
    #[validate(length(min = 1, max = 255, message = "comment must be between 1 and 255 characters"))]
    #[schema(example = "leave at door", max_length = 255)]
    pub comment: Option<String>,
}

impl From<CreateOrderRequest> for CreateOrder {
    fn from(req: CreateOrderRequest) -> Self {
        Self {
            delivery_id: req.delivery_id,
            comment: req.comment,
            items: req
                .items
                .into_iter()
                .map(|item| OrderItem {
                    item_id: item.item_id,
                    color_id: item.color_id,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    #[validate(range(min = 1, message = "statusId must be a positive integer"))]
    #[schema(example = 2)]
    pub status_id: i32,
}
