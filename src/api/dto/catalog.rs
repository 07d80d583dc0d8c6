//! Catalog request and response bodies.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::rules;
use crate::models::{
    Category, Color, Item, NewCategory, NewColor, NewItem, NewPaymentMethod, NewTag, PaymentMethod,
    Tag,
};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 30, message = "name must be between 1 and 30 characters"))]
    #[schema(example = "chairs")]
    pub name: String,
}

impl From<CreateCategoryRequest> for NewCategory {
    fn from(req: CreateCategoryRequest) -> Self {
        Self { name: req.name }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateColorRequest {
    #[validate(length(min = 1, max = 30, message = "name must be between 1 and 30 characters"))]
    #[schema(example = "walnut")]
    pub name: String,
    #[validate(custom(function = "rules::hex_color"))]
    #[schema(example = "#5d432c")]
    pub hex: String,
    /// Surcharge for this color
    #[validate(custom(function = "rules::non_negative"))]
    #[schema(value_type = String, example = "0.00")]
    pub price: BigDecimal,
}

impl From<CreateColorRequest> for NewColor {
    fn from(req: CreateColorRequest) -> Self {
        Self {
            name: req.name,
            hex: req.hex.to_lowercase(),
            price: req.price,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ColorResponse {
    pub id: i32,
    pub name: String,
    pub hex: String,
    #[schema(value_type = String)]
    pub price: BigDecimal,
}

impl From<Color> for ColorResponse {
    fn from(color: Color) -> Self {
        Self {
            id: color.id,
            name: color.name,
            hex: color.hex,
            price: color.price,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    #[schema(example = "Oak chair")]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: String,
    #[validate(range(min = 1, message = "categoryId must be a positive integer"))]
    pub category_id: i32,
    #[validate(length(min = 1, max = 64, message = "sku must be between 1 and 64 characters"))]
    #[schema(example = "CH-OAK-01")]
    pub sku: String,
    #[validate(custom(function = "rules::non_negative"))]
    #[schema(value_type = String, example = "49.90")]
    pub price: BigDecimal,
}

impl From<CreateItemRequest> for NewItem {
    fn from(req: CreateItemRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            category_id: req.category_id,
            sku: req.sku,
            price: req.price,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category_id: i32,
    pub sku: String,
    #[schema(value_type = String)]
    pub price: BigDecimal,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            category_id: item.category_id,
            sku: item.sku,
            price: item.price,
            created_at: item.created_at.to_jiff(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddItemColorRequest {
    #[validate(range(min = 1, message = "colorId must be a positive integer"))]
    pub color_id: i32,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagRequest {
    #[validate(range(min = 1, message = "itemId must be a positive integer"))]
    pub item_id: i32,
    #[validate(length(min = 1, max = 30, message = "name must be between 1 and 30 characters"))]
    #[schema(example = "outdoor")]
    pub name: String,
}

impl From<CreateTagRequest> for NewTag {
    fn from(req: CreateTagRequest) -> Self {
        Self {
            item_id: req.item_id,
            name: req.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagResponse {
    pub id: i32,
    pub item_id: i32,
    pub name: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            item_id: tag.item_id,
            name: tag.name,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreatePaymentMethodRequest {
    #[validate(length(min = 1, max = 30, message = "name must be between 1 and 30 characters"))]
    #[schema(example = "card")]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "description must be at most 255 characters"))]
    pub description: String,
}

impl From<CreatePaymentMethodRequest> for NewPaymentMethod {
    fn from(req: CreatePaymentMethodRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SetPaymentMethodActiveRequest {
    pub active: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentMethodResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub active: bool,
}

impl From<PaymentMethod> for PaymentMethodResponse {
    fn from(method: PaymentMethod) -> Self {
        Self {
            id: method.id,
            name: method.name,
            description: method.description,
            active: method.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex_is_lowercased() {
        let req: CreateColorRequest =
            serde_json::from_str(r##"{"name":"walnut","hex":"#5D432C","price":"0"}"##).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(NewColor::from(req).hex, "#5d432c");
    }

    #[test]
    fn item_description_defaults_to_empty() {
        let req: CreateItemRequest = serde_json::from_str(
            r#"{"name":"Oak chair","categoryId":1,"sku":"CH-1","price":"49.90"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.description, "");
    }

    #[test]
    fn item_requires_positive_category() {
        let req: CreateItemRequest = serde_json::from_str(
            r#"{"name":"Oak chair","categoryId":0,"sku":"CH-1","price":"1"}"#,
        )
        .unwrap();
        assert!(req.validate().unwrap_err().field_errors().contains_key("category_id"));
    }
}
