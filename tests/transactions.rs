mod common;

use bigdecimal::BigDecimal;
use storefront::db::TxContext;
use storefront::error::AppError;
use storefront::models::{DeliveryInput, NewCategory};

fn renamed(name: &str) -> DeliveryInput {
    DeliveryInput {
        name: name.to_string(),
        company_name: common::unique("Courier"),
        price: BigDecimal::from(9),
    }
}

#[tokio::test]
async fn nested_scope_commits_with_outer() {
    let Some(app) = common::setup().await else { return };
    let ctx = TxContext::new();
    let delivery_id = app.seed_catalog().await.delivery_id;
    let delivery = &app.services.delivery;
    let catalog = &app.services.catalog;
    let new_name = common::unique("overnight");
    let category = common::unique("side-effect");

    let input = renamed(&new_name);
    let expected_company = input.company_name.to_lowercase();
    let category_name = category.clone();
    app.repos
        .orders
        .run_in_transaction(&ctx, |tx| async move {
            assert!(tx.in_transaction());
            delivery.update(&tx, delivery_id, input).await?;
            catalog.create_category(&tx, NewCategory { name: category_name }).await?;
            Ok(())
        })
        .await
        .unwrap();

    let view = delivery.get_by_id(&ctx, delivery_id).await.unwrap();
    assert_eq!(view.name, new_name);
    assert_eq!(view.company_name, expected_company);
    assert_eq!(view.price, BigDecimal::from(9));

    let categories = catalog.list_categories(&ctx).await.unwrap();
    assert!(categories.iter().any(|c| c.name == category));
}

#[tokio::test]
async fn outer_failure_discards_inner_scope() {
    let Some(app) = common::setup().await else { return };
    let ctx = TxContext::new();
    let delivery_id = app.seed_catalog().await.delivery_id;
    let delivery = &app.services.delivery;
    let before = delivery.get_by_id(&ctx, delivery_id).await.unwrap();

    let input = renamed(&common::unique("never"));
    let err = app
        .repos
        .orders
        .run_in_transaction(&ctx, |tx| async move {
            delivery.update(&tx, delivery_id, input).await?;
            Err::<(), _>(AppError::invalid_input("abort after inner scope"))
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput { .. }));

    let after = delivery.get_by_id(&ctx, delivery_id).await.unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn inner_failure_aborts_outer_writes() {
    let Some(app) = common::setup().await else { return };
    let ctx = TxContext::new();
    let delivery = &app.services.delivery;
    let catalog = &app.services.catalog;
    let category = common::unique("orphan");

    let category_name = category.clone();
    let err = app
        .repos
        .categories
        .run_in_transaction(&ctx, |tx| async move {
            catalog.create_category(&tx, NewCategory { name: category_name }).await?;
            delivery.update(&tx, i32::MAX - 5, renamed("ghost")).await
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DeliveryNotFound));

    let categories = catalog.list_categories(&ctx).await.unwrap();
    assert!(categories.iter().all(|c| c.name != category));
}

#[tokio::test]
async fn calls_without_scope_autocommit() {
    let Some(app) = common::setup().await else { return };
    let ctx = TxContext::new();
    let catalog = &app.services.catalog;
    let category = common::unique("standalone");

    let id = catalog
        .create_category(&ctx, NewCategory { name: category.clone() })
        .await
        .unwrap();
    assert!(!ctx.in_transaction());

    let categories = catalog.list_categories(&ctx).await.unwrap();
    assert!(categories.iter().any(|c| c.id == id && c.name == category));
}
