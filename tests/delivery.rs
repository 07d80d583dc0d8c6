mod common;

use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use futures::future::join_all;
use storefront::db::TxContext;
use storefront::error::AppError;
use storefront::models::{CreateOrder, DeliveryInput, OrderItem};
use storefront::schema::delivery_companies;

fn input(name: &str, company: &str) -> DeliveryInput {
    DeliveryInput {
        name: name.to_string(),
        company_name: company.to_string(),
        price: BigDecimal::from(5),
    }
}

async fn company_rows(app: &common::TestApp, company: &str) -> i64 {
    let mut conn = app.database.pool().get().await.unwrap();
    delivery_companies::table
        .filter(delivery_companies::name.eq(company))
        .count()
        .get_result(&mut *conn)
        .await
        .unwrap()
}

#[tokio::test]
async fn concurrent_creates_share_one_company() {
    let Some(app) = common::setup().await else { return };
    let company = common::unique("dhl");
    let spellings = [
        format!("  {} ", company.to_uppercase()),
        company.clone(),
        format!("\t{}", company),
    ];
    let delivery = &app.services.delivery;

    let created = join_all(spellings.iter().enumerate().map(|(i, spelling)| async move {
        delivery
            .create(&TxContext::new(), input(&format!("option-{}", i), spelling))
            .await
    }))
    .await;
    let ids: Vec<i32> = created.into_iter().map(Result::unwrap).collect();

    assert_eq!(company_rows(&app, &company).await, 1);

    let ctx = TxContext::new();
    for id in ids {
        let view = delivery.get_by_id(&ctx, id).await.unwrap();
        assert_eq!(view.company_name, company);
    }
}

#[tokio::test]
async fn update_reuses_or_creates_company() {
    let Some(app) = common::setup().await else { return };
    let ctx = TxContext::new();
    let delivery = &app.services.delivery;
    let company = common::unique("ups");
    let id = delivery.create(&ctx, input("ground", &company)).await.unwrap();

    let moved_to = common::unique("fedex");
    delivery
        .update(&ctx, id, input("air", &format!(" {}", moved_to.to_uppercase())))
        .await
        .unwrap();

    let view = delivery.get_by_id(&ctx, id).await.unwrap();
    assert_eq!(view.name, "air");
    assert_eq!(view.company_name, moved_to);
    assert_eq!(company_rows(&app, &moved_to).await, 1);
    assert_eq!(company_rows(&app, &company).await, 1);
}

#[tokio::test]
async fn update_of_unknown_delivery_fails_without_side_effects() {
    let Some(app) = common::setup().await else { return };
    let ctx = TxContext::new();
    let company = common::unique("dpd");

    let err = app
        .services
        .delivery
        .update(&ctx, i32::MAX - 9, input("ghost", &company))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DeliveryNotFound));
    assert_eq!(company_rows(&app, &company).await, 0);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let Some(app) = common::setup().await else { return };
    let ctx = TxContext::new();
    let delivery = &app.services.delivery;
    let id = delivery
        .create(&ctx, input("pickup", &common::unique("local")))
        .await
        .unwrap();

    assert!(delivery.exists(&ctx, id).await.unwrap());
    delivery.delete(&ctx, id).await.unwrap();
    delivery.delete(&ctx, id).await.unwrap();
    assert!(!delivery.exists(&ctx, id).await.unwrap());

    match delivery.get_by_id(&ctx, id).await {
        Err(AppError::IdNotFound { field, .. }) => assert_eq!(field, "delivery"),
        other => panic!("Expected IdNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn delete_of_delivery_in_use_is_refused() {
    let Some(app) = common::setup().await else { return };
    let ctx = TxContext::new();
    let seed = app.seed_catalog().await;
    let user_id = app.register_user().await;
    app.services
        .orders
        .create(
            &ctx,
            user_id,
            CreateOrder {
                delivery_id: seed.delivery_id,
                comment: None,
                items: vec![OrderItem {
                    item_id: seed.item_id,
                    color_id: seed.color_id,
                    quantity: 1,
                }],
            },
        )
        .await
        .unwrap();

    match app.services.delivery.delete(&ctx, seed.delivery_id).await {
        Err(AppError::InvalidInput { message }) => {
            assert_eq!(message, format!("delivery[{}] is still referenced", seed.delivery_id))
        }
        other => panic!("Expected InvalidInput, got {:?}", other),
    }
    assert!(app.services.delivery.exists(&ctx, seed.delivery_id).await.unwrap());
}
