mod common;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use storefront::db::TxContext;
use storefront::error::AppError;
use storefront::models::{CreateOrder, OrderItem};
use storefront::schema::order_lines;

fn order_for(seed: &common::Seed, item_id: i32) -> CreateOrder {
    CreateOrder {
        delivery_id: seed.delivery_id,
        comment: Some("leave at door".to_string()),
        items: vec![OrderItem {
            item_id,
            color_id: seed.color_id,
            quantity: 2,
        }],
    }
}

#[tokio::test]
async fn created_order_reads_back_enriched() {
    let Some(app) = common::setup().await else { return };
    let ctx = TxContext::new();
    let seed = app.seed_catalog().await;
    let user_id = app.register_user().await;

    let order_id = app
        .services
        .orders
        .create(&ctx, user_id, order_for(&seed, seed.item_id))
        .await
        .unwrap();

    let order = app.services.orders.get_by_id(&ctx, order_id).await.unwrap();
    assert_eq!(order.id, order_id);
    assert_eq!(order.user_id, user_id);
    assert_eq!(order.status, "created");
    assert_eq!(order.comment.as_deref(), Some("leave at door"));
    assert_eq!(order.delivery.id, seed.delivery_id);
    assert_eq!(
        order.items,
        vec![OrderItem {
            item_id: seed.item_id,
            color_id: seed.color_id,
            quantity: 2,
        }]
    );

    let mine = app.services.orders.get_all_by_user_id(&ctx, user_id).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, order_id);
}

async fn line_rows(app: &common::TestApp, order_id: i32) -> i64 {
    let mut conn = app.database.pool().get().await.unwrap();
    order_lines::table
        .filter(order_lines::order_id.eq(order_id))
        .count()
        .get_result(&mut *conn)
        .await
        .unwrap()
}

#[tokio::test]
async fn lines_read_back_in_request_order() {
    let Some(app) = common::setup().await else { return };
    let ctx = TxContext::new();
    let seed = app.seed_catalog().await;
    let user_id = app.register_user().await;
    let second = app.add_color(seed.item_id).await;
    let third = app.add_color(seed.item_id).await;

    // Highest color id first so request order differs from id order.
    let items = vec![
        OrderItem { item_id: seed.item_id, color_id: third, quantity: 1 },
        OrderItem { item_id: seed.item_id, color_id: seed.color_id, quantity: 4 },
        OrderItem { item_id: seed.item_id, color_id: second, quantity: 2 },
    ];
    let order = CreateOrder {
        delivery_id: seed.delivery_id,
        comment: None,
        items: items.clone(),
    };
    let order_id = app.services.orders.create(&ctx, user_id, order).await.unwrap();

    let created = app.services.orders.get_by_id(&ctx, order_id).await.unwrap();
    assert_eq!(created.items, items);
    assert_eq!(line_rows(&app, order_id).await, 3);
}

#[tokio::test]
async fn missing_item_rolls_back_whole_order() {
    let Some(app) = common::setup().await else { return };
    let ctx = TxContext::new();
    let seed = app.seed_catalog().await;
    let user_id = app.register_user().await;
    let missing_item = i32::MAX - 11;

    let err = app
        .services
        .orders
        .create(&ctx, user_id, order_for(&seed, missing_item))
        .await
        .unwrap_err();
    match &err {
        AppError::IdNotFound { field, id } => {
            assert_eq!(field, "item");
            assert_eq!(*id, i64::from(missing_item));
        }
        other => panic!("Expected IdNotFound, got {:?}", other),
    }
    assert_eq!(err.to_string(), format!("item[{}] not found", missing_item));

    let mine = app.services.orders.get_all_by_user_id(&ctx, user_id).await.unwrap();
    assert!(mine.is_empty(), "no order row may survive a failed line");
}

#[tokio::test]
async fn later_failing_line_discards_earlier_lines() {
    let Some(app) = common::setup().await else { return };
    let ctx = TxContext::new();
    let seed = app.seed_catalog().await;
    let user_id = app.register_user().await;
    let missing_color = i32::MAX - 3;

    let mut order = order_for(&seed, seed.item_id);
    order.items.push(OrderItem {
        item_id: seed.item_id,
        color_id: missing_color,
        quantity: 1,
    });

    match app.services.orders.create(&ctx, user_id, order).await {
        Err(AppError::IdNotFound { field, id }) => {
            assert_eq!(field, "color");
            assert_eq!(id, i64::from(missing_color));
        }
        other => panic!("Expected IdNotFound, got {:?}", other),
    }
    assert!(app.services.orders.get_all_by_user_id(&ctx, user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_delivery_is_reported_before_insert() {
    let Some(app) = common::setup().await else { return };
    let ctx = TxContext::new();
    let seed = app.seed_catalog().await;
    let user_id = app.register_user().await;

    let mut order = order_for(&seed, seed.item_id);
    order.delivery_id = i32::MAX - 7;

    match app.services.orders.create(&ctx, user_id, order).await {
        Err(AppError::IdNotFound { field, .. }) => assert_eq!(field, "delivery"),
        other => panic!("Expected IdNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_order_touches_no_storage() {
    let Some(app) = common::setup().await else { return };
    let seed = app.seed_catalog().await;

    let mut order = order_for(&seed, seed.item_id);
    order.items.clear();

    assert!(matches!(
        app.services.orders.create(&TxContext::new(), 1, order).await,
        Err(AppError::InvalidInput { .. })
    ));
}

#[tokio::test]
async fn status_update_checks_order_and_status() {
    let Some(app) = common::setup().await else { return };
    let ctx = TxContext::new();
    let seed = app.seed_catalog().await;
    let user_id = app.register_user().await;
    let order_id = app
        .services
        .orders
        .create(&ctx, user_id, order_for(&seed, seed.item_id))
        .await
        .unwrap();

    app.services.orders.update_status(&ctx, order_id, 3).await.unwrap();
    let order = app.services.orders.get_by_id(&ctx, order_id).await.unwrap();
    assert_eq!(order.status, "shipped");

    match app.services.orders.update_status(&ctx, order_id, 999).await {
        Err(AppError::IdNotFound { field, id }) => {
            assert_eq!(field, "status");
            assert_eq!(id, 999);
        }
        other => panic!("Expected IdNotFound, got {:?}", other),
    }

    match app.services.orders.update_status(&ctx, i32::MAX - 1, 2).await {
        Err(AppError::IdNotFound { field, .. }) => assert_eq!(field, "order"),
        other => panic!("Expected IdNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn delete_removes_order_and_reports_missing_ids() {
    let Some(app) = common::setup().await else { return };
    let ctx = TxContext::new();
    let seed = app.seed_catalog().await;
    let user_id = app.register_user().await;
    let order_id = app
        .services
        .orders
        .create(&ctx, user_id, order_for(&seed, seed.item_id))
        .await
        .unwrap();

    assert_eq!(line_rows(&app, order_id).await, 1);
    app.services.orders.delete(&ctx, order_id).await.unwrap();
    assert_eq!(line_rows(&app, order_id).await, 0);
    assert!(matches!(
        app.services.orders.get_by_id(&ctx, order_id).await,
        Err(AppError::IdNotFound { .. })
    ));

    match app.services.orders.delete(&ctx, order_id).await {
        Err(AppError::IdNotFound { field, id }) => {
            assert_eq!(field, "order");
            assert_eq!(id, i64::from(order_id));
        }
        other => panic!("Expected IdNotFound, got {:?}", other),
    }
}
