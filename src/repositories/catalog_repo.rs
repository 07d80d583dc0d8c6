//! Catalog repositories: categories, colors, items, tags and payment methods.
//!
//! These are straight-through CRUD calls; constraint violations come back as
//! `UniqueValue` / `IdNotFound` through the error converter.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::{Database, TxContext};
use crate::error::AppResult;
use crate::models::{
    Category, Color, Item, ItemColor, NewCategory, NewColor, NewItem, NewPaymentMethod, NewTag,
    PaymentMethod, Tag,
};
use crate::repositories::{db_error, transactional};

#[derive(Clone)]
pub struct CategoryRepository {
    db: Database,
}

transactional!(CategoryRepository);

impl CategoryRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create(&self, ctx: &TxContext, category: NewCategory) -> AppResult<i32> {
        use crate::schema::categories::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::insert_into(categories)
            .values(&category)
            .returning(id)
            .get_result(&mut *conn)
            .await
            .map_err(db_error("insert category"))
    }

    pub async fn list_all(&self, ctx: &TxContext) -> AppResult<Vec<Category>> {
        use crate::schema::categories::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        categories
            .order(id.asc())
            .select(Category::as_select())
            .load(&mut *conn)
            .await
            .map_err(db_error("list categories"))
    }

    pub async fn delete(&self, ctx: &TxContext, category_id: i32) -> AppResult<usize> {
        use crate::schema::categories::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::delete(categories.filter(id.eq(category_id)))
            .execute(&mut *conn)
            .await
            .map_err(db_error("delete category"))
    }
}

#[derive(Clone)]
pub struct ColorRepository {
    db: Database,
}

transactional!(ColorRepository);

impl ColorRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create(&self, ctx: &TxContext, color: NewColor) -> AppResult<i32> {
        use crate::schema::colors::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::insert_into(colors)
            .values(&color)
            .returning(id)
            .get_result(&mut *conn)
            .await
            .map_err(db_error("insert color"))
    }

    pub async fn list_all(&self, ctx: &TxContext) -> AppResult<Vec<Color>> {
        use crate::schema::colors::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        colors
            .order(id.asc())
            .select(Color::as_select())
            .load(&mut *conn)
            .await
            .map_err(db_error("list colors"))
    }

    pub async fn delete(&self, ctx: &TxContext, color_id: i32) -> AppResult<usize> {
        use crate::schema::colors::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::delete(colors.filter(id.eq(color_id)))
            .execute(&mut *conn)
            .await
            .map_err(db_error("delete color"))
    }
}

#[derive(Clone)]
pub struct ItemRepository {
    db: Database,
}

transactional!(ItemRepository);

impl ItemRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create(&self, ctx: &TxContext, item: NewItem) -> AppResult<i32> {
        use crate::schema::items::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::insert_into(items)
            .values(&item)
            .returning(id)
            .get_result(&mut *conn)
            .await
            .map_err(db_error("insert item"))
    }

    pub async fn find_by_id(&self, ctx: &TxContext, item_id: i32) -> AppResult<Option<Item>> {
        use crate::schema::items::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        items
            .filter(id.eq(item_id))
            .select(Item::as_select())
            .first(&mut *conn)
            .await
            .optional()
            .map_err(db_error("find item"))
    }

    /// Items, newest first.
    pub async fn list_all(&self, ctx: &TxContext) -> AppResult<Vec<Item>> {
        use crate::schema::items::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        items
            .order((created_at.desc(), id.desc()))
            .select(Item::as_select())
            .load(&mut *conn)
            .await
            .map_err(db_error("list items"))
    }

    pub async fn delete(&self, ctx: &TxContext, item_id: i32) -> AppResult<usize> {
        use crate::schema::items::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::delete(items.filter(id.eq(item_id)))
            .execute(&mut *conn)
            .await
            .map_err(db_error("delete item"))
    }

    /// Links a color to an item. Linking an existing pair is a no-op.
    pub async fn add_color(&self, ctx: &TxContext, link: ItemColor) -> AppResult<()> {
        use crate::schema::item_colors::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::insert_into(item_colors)
            .values(&link)
            .on_conflict_do_nothing()
            .execute(&mut *conn)
            .await
            .map_err(db_error("link item color"))?;
        Ok(())
    }

    pub async fn colors_for(&self, ctx: &TxContext, for_item: i32) -> AppResult<Vec<Color>> {
        use crate::schema::{colors, item_colors};
        let mut conn = self.db.resolve(ctx).await?;

        item_colors::table
            .inner_join(colors::table)
            .filter(item_colors::item_id.eq(for_item))
            .order(colors::id.asc())
            .select(Color::as_select())
            .load(&mut *conn)
            .await
            .map_err(db_error("list item colors"))
    }
}

#[derive(Clone)]
pub struct TagRepository {
    db: Database,
}

transactional!(TagRepository);

impl TagRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create(&self, ctx: &TxContext, tag: NewTag) -> AppResult<i32> {
        use crate::schema::tags::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::insert_into(tags)
            .values(&tag)
            .returning(id)
            .get_result(&mut *conn)
            .await
            .map_err(db_error("insert tag"))
    }

    pub async fn list_by_item(&self, ctx: &TxContext, for_item: i32) -> AppResult<Vec<Tag>> {
        use crate::schema::tags::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        tags.filter(item_id.eq(for_item))
            .order(id.asc())
            .select(Tag::as_select())
            .load(&mut *conn)
            .await
            .map_err(db_error("list tags"))
    }

    pub async fn delete(&self, ctx: &TxContext, tag_id: i32) -> AppResult<usize> {
        use crate::schema::tags::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::delete(tags.filter(id.eq(tag_id)))
            .execute(&mut *conn)
            .await
            .map_err(db_error("delete tag"))
    }
}

#[derive(Clone)]
pub struct PaymentMethodRepository {
    db: Database,
}

transactional!(PaymentMethodRepository);

impl PaymentMethodRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create(&self, ctx: &TxContext, method: NewPaymentMethod) -> AppResult<i32> {
        use crate::schema::payment_methods::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::insert_into(payment_methods)
            .values(&method)
            .returning(id)
            .get_result(&mut *conn)
            .await
            .map_err(db_error("insert payment method"))
    }

    pub async fn list_all(&self, ctx: &TxContext) -> AppResult<Vec<PaymentMethod>> {
        use crate::schema::payment_methods::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        payment_methods
            .order(id.asc())
            .select(PaymentMethod::as_select())
            .load(&mut *conn)
            .await
            .map_err(db_error("list payment methods"))
    }

    pub async fn set_active(&self, ctx: &TxContext, method_id: i32, is_active: bool) -> AppResult<usize> {
        use crate::schema::payment_methods::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::update(payment_methods.filter(id.eq(method_id)))
            .set(active.eq(is_active))
            .execute(&mut *conn)
            .await
            .map_err(db_error("update payment method"))
    }
}
