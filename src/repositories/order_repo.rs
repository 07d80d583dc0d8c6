//! Orders, their lines and the status lookup.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::{Database, TxContext};
use crate::error::AppResult;
use crate::models::{NewOrder, NewOrderLine, Order, OrderLine, Status};
use crate::repositories::{db_error, db_error_expecting, transactional};

#[derive(Clone)]
pub struct OrderRepository {
    db: Database,
}

transactional!(OrderRepository);

impl OrderRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn exists(&self, ctx: &TxContext, order_id: i32) -> AppResult<bool> {
        use crate::schema::orders::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::select(diesel::dsl::exists(orders.filter(id.eq(order_id))))
            .get_result(&mut *conn)
            .await
            .map_err(db_error("check order"))
    }

    /// Inserts the order row with the default status and returns its id.
    pub async fn create(&self, ctx: &TxContext, order: NewOrder) -> AppResult<i32> {
        use crate::schema::orders::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::insert_into(orders)
            .values(&order)
            .returning(id)
            .get_result(&mut *conn)
            .await
            .map_err(db_error("insert order"))
    }

    /// Inserts one order line. A missing item or color surfaces as
    /// `IdNotFound` with the constraint's field; any other violation is
    /// `Storage` carrying the diesel error.
    pub async fn add_line(&self, ctx: &TxContext, line: NewOrderLine) -> AppResult<()> {
        use crate::schema::order_lines::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::insert_into(order_lines)
            .values(&line)
            .execute(&mut *conn)
            .await
            .map_err(db_error_expecting("insert order line", &["item", "color"]))?;
        Ok(())
    }

    pub async fn update_status(&self, ctx: &TxContext, order_id: i32, new_status: i32) -> AppResult<usize> {
        use crate::schema::orders::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::update(orders.filter(id.eq(order_id)))
            .set(status_id.eq(new_status))
            .execute(&mut *conn)
            .await
            .map_err(db_error("update order status"))
    }

    /// Deletes the order; its lines go with it through the cascading key.
    pub async fn delete(&self, ctx: &TxContext, order_id: i32) -> AppResult<usize> {
        use crate::schema::orders::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        diesel::delete(orders.filter(id.eq(order_id)))
            .execute(&mut *conn)
            .await
            .map_err(db_error("delete order"))
    }

    pub async fn find_by_id(&self, ctx: &TxContext, order_id: i32) -> AppResult<Option<Order>> {
        use crate::schema::orders::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        orders
            .filter(id.eq(order_id))
            .select(Order::as_select())
            .first(&mut *conn)
            .await
            .optional()
            .map_err(db_error("find order"))
    }

    /// All orders, newest first.
    pub async fn list_all(&self, ctx: &TxContext) -> AppResult<Vec<Order>> {
        use crate::schema::orders::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        orders
            .order((created_at.desc(), id.desc()))
            .select(Order::as_select())
            .load(&mut *conn)
            .await
            .map_err(db_error("list orders"))
    }

    /// Orders placed by `owner`, newest first.
    pub async fn list_by_user_id(&self, ctx: &TxContext, owner: i32) -> AppResult<Vec<Order>> {
        use crate::schema::orders::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        orders
            .filter(user_id.eq(owner))
            .order((created_at.desc(), id.desc()))
            .select(Order::as_select())
            .load(&mut *conn)
            .await
            .map_err(db_error("list user orders"))
    }

    /// Lines of one order in insertion order.
    pub async fn lines_for(&self, ctx: &TxContext, for_order: i32) -> AppResult<Vec<OrderLine>> {
        use crate::schema::order_lines::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        order_lines
            .filter(order_id.eq(for_order))
            .order(id.asc())
            .select(OrderLine::as_select())
            .load(&mut *conn)
            .await
            .map_err(db_error("list order lines"))
    }

    pub async fn find_status(&self, ctx: &TxContext, for_status: i32) -> AppResult<Option<Status>> {
        use crate::schema::statuses::dsl::*;
        let mut conn = self.db.resolve(ctx).await?;

        statuses
            .filter(id.eq(for_status))
            .select(Status::as_select())
            .first(&mut *conn)
            .await
            .optional()
            .map_err(db_error("find status"))
    }
}
