//! Order placement and administration.
//!
//! Placing an order inserts the order row and every line in one transaction.
//! Missing items and colors are detected by the line foreign keys, not by
//! pre-checks, and reported with the id the caller submitted.

use std::collections::HashSet;

use crate::db::TxContext;
use crate::error::{AppError, AppResult};
use crate::models::{CreateOrder, EnrichedOrder, NewOrder, NewOrderLine, Order, OrderItem};
use crate::repositories::OrderRepository;
use crate::services::DeliveryService;

#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    delivery: DeliveryService,
}

impl OrderService {
    pub fn new(orders: OrderRepository, delivery: DeliveryService) -> Self {
        Self { orders, delivery }
    }

    /// Places an order for `user_id` and returns the new order id.
    ///
    /// Input is checked before any storage access. On any failure inside the
    /// transaction neither the order row nor any of its lines persist.
    pub async fn create(&self, ctx: &TxContext, user_id: i32, order: CreateOrder) -> AppResult<i32> {
        validate_order(&order)?;
        let line_count = order.items.len();

        let order_id = self
            .orders
            .run_in_transaction(ctx, |tx| async move {
                if !self.delivery.exists(&tx, order.delivery_id).await? {
                    return Err(AppError::id_not_found("delivery", order.delivery_id));
                }

                let order_id = self
                    .orders
                    .create(
                        &tx,
                        NewOrder {
                            user_id,
                            delivery_id: order.delivery_id,
                            comment: order.comment,
                        },
                    )
                    .await?;

                for item in &order.items {
                    let line = NewOrderLine {
                        order_id,
                        item_id: item.item_id,
                        color_id: item.color_id,
                        quantity: item.quantity,
                    };
                    self.orders
                        .add_line(&tx, line)
                        .await
                        .map_err(|err| translate_line_error(err, item))?;
                }

                Ok(order_id)
            })
            .await?;

        tracing::info!(order_id, user_id, lines = line_count, "Order created");
        Ok(order_id)
    }

    pub async fn get_by_id(&self, ctx: &TxContext, id: i32) -> AppResult<EnrichedOrder> {
        self.orders
            .run_in_transaction(ctx, |tx| async move {
                let order = self
                    .orders
                    .find_by_id(&tx, id)
                    .await?
                    .ok_or_else(|| AppError::id_not_found("order", id))?;
                self.enrich(&tx, order).await
            })
            .await
    }

    /// Orders of one user, newest first.
    pub async fn get_all_by_user_id(&self, ctx: &TxContext, user_id: i32) -> AppResult<Vec<EnrichedOrder>> {
        self.orders
            .run_in_transaction(ctx, |tx| async move {
                let orders = self.orders.list_by_user_id(&tx, user_id).await?;
                self.enrich_all(&tx, orders).await
            })
            .await
    }

    /// Every order, newest first.
    pub async fn get_all(&self, ctx: &TxContext) -> AppResult<Vec<EnrichedOrder>> {
        self.orders
            .run_in_transaction(ctx, |tx| async move {
                let orders = self.orders.list_all(&tx).await?;
                self.enrich_all(&tx, orders).await
            })
            .await
    }

    /// Moves an order to another status.
    pub async fn update_status(&self, ctx: &TxContext, id: i32, status_id: i32) -> AppResult<()> {
        if status_id <= 0 {
            return Err(AppError::invalid_input("statusId must be a positive integer"));
        }

        let affected = self.orders.update_status(ctx, id, status_id).await?;
        if affected == 0 {
            return Err(AppError::id_not_found("order", id));
        }

        tracing::info!(order_id = id, status_id, "Order status updated");
        Ok(())
    }

    /// Deletes an order and, through the cascading key, its lines.
    pub async fn delete(&self, ctx: &TxContext, id: i32) -> AppResult<()> {
        self.orders
            .run_in_transaction(ctx, |tx| async move {
                if !self.orders.exists(&tx, id).await? {
                    return Err(AppError::id_not_found("order", id));
                }
                self.orders.delete(&tx, id).await?;
                Ok(())
            })
            .await?;

        tracing::info!(order_id = id, "Order deleted");
        Ok(())
    }

    async fn enrich_all(&self, tx: &TxContext, orders: Vec<Order>) -> AppResult<Vec<EnrichedOrder>> {
        let mut enriched = Vec::with_capacity(orders.len());
        for order in orders {
            enriched.push(self.enrich(tx, order).await?);
        }
        Ok(enriched)
    }

    async fn enrich(&self, tx: &TxContext, order: Order) -> AppResult<EnrichedOrder> {
        let items = self
            .orders
            .lines_for(tx, order.id)
            .await?
            .into_iter()
            .map(OrderItem::from)
            .collect();
        let delivery = self.delivery.get_by_id(tx, order.delivery_id).await?;
        let status = self
            .orders
            .find_status(tx, order.status_id)
            .await?
            .ok_or_else(|| AppError::id_not_found("status", order.status_id))?;

        Ok(EnrichedOrder {
            id: order.id,
            status: status.name,
            user_id: order.user_id,
            comment: order.comment,
            items,
            delivery,
            created_at: order.created_at.to_jiff(),
        })
    }
}

/// Business preconditions that need no storage access.
pub fn validate_order(order: &CreateOrder) -> AppResult<()> {
    if order.items.is_empty() {
        return Err(AppError::invalid_input("order must contain at least one item"));
    }
    if order.delivery_id <= 0 {
        return Err(AppError::invalid_input("deliveryId must be a positive integer"));
    }

    let mut seen = HashSet::with_capacity(order.items.len());
    for (index, item) in order.items.iter().enumerate() {
        if item.quantity < 1 {
            return Err(AppError::invalid_input(format!(
                "items[{}].quantity must be at least 1",
                index
            )));
        }
        if item.item_id <= 0 || item.color_id <= 0 {
            return Err(AppError::invalid_input(format!(
                "items[{}] ids must be positive integers",
                index
            )));
        }
        if !seen.insert((item.item_id, item.color_id)) {
            return Err(AppError::invalid_input(format!(
                "items[{}] repeats item {} in color {}",
                index, item.item_id, item.color_id
            )));
        }
    }

    Ok(())
}

/// Reports a missing item or color with the id the caller asked for.
fn translate_line_error(err: AppError, item: &OrderItem) -> AppError {
    match err {
        AppError::IdNotFound { field, .. } if field == "item" => {
            AppError::id_not_found("item", item.item_id)
        }
        AppError::IdNotFound { field, .. } if field == "color" => {
            AppError::id_not_found("color", item.color_id)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(item_id: i32, color_id: i32, quantity: i32) -> OrderItem {
        OrderItem {
            item_id,
            color_id,
            quantity,
        }
    }

    fn order(items: Vec<OrderItem>) -> CreateOrder {
        CreateOrder {
            delivery_id: 7,
            comment: Some("leave at door".to_string()),
            items,
        }
    }

    fn assert_invalid(result: AppResult<()>) {
        match result {
            Err(AppError::InvalidInput { .. }) => {}
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn accepts_well_formed_order() {
        assert!(validate_order(&order(vec![item(11, 3, 2), item(11, 4, 1)])).is_ok());
    }

    #[test]
    fn rejects_empty_items() {
        assert_invalid(validate_order(&order(vec![])));
    }

    #[test]
    fn rejects_non_positive_quantity() {
        assert_invalid(validate_order(&order(vec![item(11, 3, 0)])));
        assert_invalid(validate_order(&order(vec![item(11, 3, -2)])));
    }

    #[test]
    fn rejects_non_positive_ids() {
        assert_invalid(validate_order(&order(vec![item(0, 3, 1)])));
        assert_invalid(validate_order(&order(vec![item(11, -1, 1)])));

        let mut bad_delivery = order(vec![item(11, 3, 1)]);
        bad_delivery.delivery_id = 0;
        assert_invalid(validate_order(&bad_delivery));
    }

    #[test]
    fn rejects_repeated_line() {
        assert_invalid(validate_order(&order(vec![item(11, 3, 1), item(11, 3, 4)])));
    }

    #[test]
    fn missing_item_reports_requested_id() {
        let err = translate_line_error(AppError::id_not_found("item", 0), &item(11, 3, 2));
        assert_eq!(err.to_string(), "item[11] not found");
    }

    #[test]
    fn missing_color_reports_requested_id() {
        let err = translate_line_error(AppError::id_not_found("color", 0), &item(11, 3, 2));
        assert_eq!(err.to_string(), "color[3] not found");
    }

    #[test]
    fn unrelated_errors_pass_through() {
        let err = translate_line_error(AppError::UniqueValue { field: "line".into() }, &item(1, 1, 1));
        assert!(matches!(err, AppError::UniqueValue { .. }));
    }
}
