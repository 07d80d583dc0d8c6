//! Catalog management: categories, colors, items, tags, payment methods.
//!
//! Mostly straight-through calls; deletes of unknown ids report `IdNotFound`.

use crate::db::TxContext;
use crate::error::{AppError, AppResult};
use crate::models::{
    Category, Color, Item, ItemColor, NewCategory, NewColor, NewItem, NewPaymentMethod, NewTag,
    PaymentMethod, Tag,
};
use crate::repositories::{
    CategoryRepository, ColorRepository, ItemRepository, PaymentMethodRepository, TagRepository,
};

#[derive(Clone)]
pub struct CatalogService {
    categories: CategoryRepository,
    colors: ColorRepository,
    items: ItemRepository,
    tags: TagRepository,
    payment_methods: PaymentMethodRepository,
}

fn expect_affected(affected: usize, field: &str, id: i32) -> AppResult<()> {
    if affected == 0 {
        return Err(AppError::id_not_found(field, id));
    }
    Ok(())
}

impl CatalogService {
    pub fn new(
        categories: CategoryRepository,
        colors: ColorRepository,
        items: ItemRepository,
        tags: TagRepository,
        payment_methods: PaymentMethodRepository,
    ) -> Self {
        Self {
            categories,
            colors,
            items,
            tags,
            payment_methods,
        }
    }

    pub async fn create_category(&self, ctx: &TxContext, category: NewCategory) -> AppResult<i32> {
        self.categories.create(ctx, category).await
    }

    pub async fn list_categories(&self, ctx: &TxContext) -> AppResult<Vec<Category>> {
        self.categories.list_all(ctx).await
    }

    /// Deleting a category also removes its items.
    pub async fn delete_category(&self, ctx: &TxContext, id: i32) -> AppResult<()> {
        expect_affected(self.categories.delete(ctx, id).await?, "category", id)
    }

    pub async fn create_color(&self, ctx: &TxContext, color: NewColor) -> AppResult<i32> {
        self.colors.create(ctx, color).await
    }

    pub async fn list_colors(&self, ctx: &TxContext) -> AppResult<Vec<Color>> {
        self.colors.list_all(ctx).await
    }

    pub async fn delete_color(&self, ctx: &TxContext, id: i32) -> AppResult<()> {
        expect_affected(self.colors.delete(ctx, id).await?, "color", id)
    }

    /// Unknown category surfaces as `IdNotFound{"category"}`; a reused SKU as
    /// `UniqueValue{"sku"}`.
    pub async fn create_item(&self, ctx: &TxContext, item: NewItem) -> AppResult<i32> {
        let item_id = self.items.create(ctx, item).await?;
        tracing::info!(item_id, "Item created");
        Ok(item_id)
    }

    pub async fn get_item(&self, ctx: &TxContext, id: i32) -> AppResult<Item> {
        self.items
            .find_by_id(ctx, id)
            .await?
            .ok_or_else(|| AppError::id_not_found("item", id))
    }

    pub async fn list_items(&self, ctx: &TxContext) -> AppResult<Vec<Item>> {
        self.items.list_all(ctx).await
    }

    pub async fn delete_item(&self, ctx: &TxContext, id: i32) -> AppResult<()> {
        expect_affected(self.items.delete(ctx, id).await?, "item", id)
    }

    pub async fn add_item_color(&self, ctx: &TxContext, link: ItemColor) -> AppResult<()> {
        self.items.add_color(ctx, link).await
    }

    /// Colors offered for an item; `IdNotFound{"item"}` for an unknown item.
    pub async fn list_item_colors(&self, ctx: &TxContext, item_id: i32) -> AppResult<Vec<Color>> {
        self.items
            .run_in_transaction(ctx, |tx| async move {
                self.get_item(&tx, item_id).await?;
                self.items.colors_for(&tx, item_id).await
            })
            .await
    }

    pub async fn create_tag(&self, ctx: &TxContext, tag: NewTag) -> AppResult<i32> {
        self.tags.create(ctx, tag).await
    }

    pub async fn list_item_tags(&self, ctx: &TxContext, item_id: i32) -> AppResult<Vec<Tag>> {
        self.tags.list_by_item(ctx, item_id).await
    }

    pub async fn delete_tag(&self, ctx: &TxContext, id: i32) -> AppResult<()> {
        expect_affected(self.tags.delete(ctx, id).await?, "tag", id)
    }

    pub async fn create_payment_method(&self, ctx: &TxContext, method: NewPaymentMethod) -> AppResult<i32> {
        self.payment_methods.create(ctx, method).await
    }

    pub async fn list_payment_methods(&self, ctx: &TxContext) -> AppResult<Vec<PaymentMethod>> {
        self.payment_methods.list_all(ctx).await
    }

    pub async fn set_payment_method_active(&self, ctx: &TxContext, id: i32, active: bool) -> AppResult<()> {
        let affected = self.payment_methods.set_active(ctx, id, active).await?;
        expect_affected(affected, "payment_method", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_affected_rows_is_id_not_found() {
        let err = expect_affected(0, "tag", 9).unwrap_err();
        assert_eq!(err.to_string(), "tag[9] not found");
        assert!(expect_affected(1, "tag", 9).is_ok());
    }
}
