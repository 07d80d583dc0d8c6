//! Catalog rows: categories, colors, items, tags and payment methods.

use bigdecimal::BigDecimal;
use diesel::prelude::*;
use jiff_diesel::Timestamp;

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Category {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub name: String,
}

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::colors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Color {
    pub id: i32,
    pub name: String,
    pub hex: String,
    pub price: BigDecimal,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::colors)]
pub struct NewColor {
    pub name: String,
    pub hex: String,
    pub price: BigDecimal,
}

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category_id: i32,
    pub sku: String,
    pub price: BigDecimal,
    pub created_at: Timestamp,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::items)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub category_id: i32,
    pub sku: String,
    pub price: BigDecimal,
}

/// Item to color link
#[derive(Debug, Queryable, Selectable, Insertable, Clone, Copy, PartialEq, Eq)]
#[diesel(table_name = crate::schema::item_colors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ItemColor {
    pub item_id: i32,
    pub color_id: i32,
}

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Tag {
    pub id: i32,
    pub item_id: i32,
    pub name: String,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::tags)]
pub struct NewTag {
    pub item_id: i32,
    pub name: String,
}

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::payment_methods)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PaymentMethod {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub active: bool,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::payment_methods)]
pub struct NewPaymentMethod {
    pub name: String,
    pub description: String,
}
