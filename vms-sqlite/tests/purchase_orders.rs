mod common;

use common::{T0, TestApp, acme, day, order_for};
use serde_json::{Value, json};
use vms_core::{
    models::{OrderStatus, PurchaseOrderUpdate, QualityRating},
    ports::{Application, OrderFailure, PurchaseOrderRepository, VendorRepository},
};
use vms_sqlite::{
    Db,
    types::{PurchaseOrderId, VendorId},
};

async fn setup() -> anyhow::Result<(TestApp, VendorId)> {
    let app = TestApp::new().await?;
    let vendor_id = app.generate_vendor_id(&acme());
    app.database()
        .create_vendor(vendor_id, acme(), T0.into())
        .await?;
    Ok((app, vendor_id))
}

async fn place(app: &TestApp, vendor_id: VendorId, delivery: i64) -> anyhow::Result<PurchaseOrderId> {
    let data = order_for(vendor_id, Some(day(delivery)));
    let order_id = app.generate_purchase_order_id(&data);
    app.database()
        .create_order(order_id, data, T0.into())
        .await?
        .expect("vendor exists");
    Ok(order_id)
}

#[tokio::test]
async fn test_create_defaults() -> anyhow::Result<()> {
    let (app, vendor_id) = setup().await?;
    let db = app.database();

    let data = order_for(vendor_id, None);
    let order_id = app.generate_purchase_order_id(&data);
    let order = db
        .create_order(order_id, data, T0.into())
        .await?
        .expect("vendor exists");

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.order_date, day(0));
    assert_eq!(order.issue_date, day(0));
    assert_eq!(order.delivery_date, None);
    assert_eq!(order.acknowledgment_date, None);
    assert_eq!(order.quality_rating, None);

    let stored = <Db as PurchaseOrderRepository<Value>>::get_order(db, order_id).await?;
    assert_eq!(stored, Some(order));

    // a single pending order recalculates the vendor to all zeros
    let vendor = db.get_vendor(vendor_id).await?.expect("vendor exists");
    assert_eq!(vendor.metrics.fulfillment_rate, 0.0);
    assert_eq!(vendor.metrics.on_time_delivery_rate, 0.0);

    Ok(())
}

#[tokio::test]
async fn test_create_for_unknown_vendor() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let db = app.database();

    let data = order_for(VendorId::new_v4(), None);
    let order_id = app.generate_purchase_order_id(&data);
    let outcome = db.create_order(order_id, data, T0.into()).await?;
    assert_eq!(outcome.map(|order| order.id), Err(OrderFailure::UnknownVendor));

    let orders = <Db as PurchaseOrderRepository<Value>>::list_orders(db, None).await?;
    assert!(orders.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_list_filters_by_vendor() -> anyhow::Result<()> {
    let (app, vendor_id) = setup().await?;
    let db = app.database();

    let other_id = app.generate_vendor_id(&acme());
    db.create_vendor(other_id, acme(), T0.into()).await?;

    let first = place(&app, vendor_id, 1).await?;
    let second = place(&app, other_id, 1).await?;
    let third = place(&app, vendor_id, 1).await?;

    let ids = |orders: Vec<vms_sqlite::types::PurchaseOrder<Value>>| {
        orders.into_iter().map(|order| order.id).collect::<Vec<_>>()
    };

    let all = <Db as PurchaseOrderRepository<Value>>::list_orders(db, None).await?;
    assert_eq!(ids(all), vec![first, second, third]);

    let mine = <Db as PurchaseOrderRepository<Value>>::list_orders(db, Some(vendor_id)).await?;
    assert_eq!(ids(mine), vec![first, third]);

    Ok(())
}

#[tokio::test]
async fn test_lifecycle() -> anyhow::Result<()> {
    let (app, vendor_id) = setup().await?;
    let db = app.database();
    let order_id = place(&app, vendor_id, 3).await?;

    let acknowledged = <Db as PurchaseOrderRepository<Value>>::acknowledge_order(db, order_id, day(1))
        .await?
        .expect("first acknowledgment");
    assert_eq!(acknowledged.acknowledgment_date, Some(day(1)));

    let vendor = db.get_vendor(vendor_id).await?.expect("vendor exists");
    assert_eq!(vendor.metrics.average_response_time, 1.0);
    assert_eq!(vendor.metrics.fulfillment_rate, 0.0);
    assert_eq!(db.get_vendor_history(vendor_id).await?, Some(vec![]));

    let again = <Db as PurchaseOrderRepository<Value>>::acknowledge_order(db, order_id, day(2)).await?;
    assert_eq!(again.map(|order| order.id), Err(OrderFailure::AlreadyAcknowledged));

    let completed = <Db as PurchaseOrderRepository<Value>>::complete_order(db, order_id, day(2))
        .await?
        .expect("order is pending");
    assert_eq!(completed.status, OrderStatus::Completed);

    let vendor = db.get_vendor(vendor_id).await?.expect("vendor exists");
    assert_eq!(vendor.metrics.on_time_delivery_rate, 100.0);
    assert_eq!(vendor.metrics.fulfillment_rate, 100.0);
    assert_eq!(vendor.updated_at, day(2));

    let rating = QualityRating::try_from(4.5)?;
    let rated = <Db as PurchaseOrderRepository<Value>>::rate_order(db, order_id, rating, day(4))
        .await?
        .expect("order is completed");
    assert_eq!(rated.quality_rating, Some(rating));

    let vendor = db.get_vendor(vendor_id).await?.expect("vendor exists");
    assert_eq!(vendor.metrics.quality_rating_avg, 4.5);

    let history = db.get_vendor_history(vendor_id).await?.expect("vendor exists");
    assert_eq!(history.len(), 2);
    // newest first
    assert_eq!(history[0].date, day(4));
    assert_eq!(history[0].metrics, vendor.metrics);
    assert_eq!(history[1].date, day(2));
    assert_eq!(history[1].metrics.quality_rating_avg, 0.0);

    Ok(())
}

#[tokio::test]
async fn test_rejections_leave_no_trace() -> anyhow::Result<()> {
    let (app, vendor_id) = setup().await?;
    let db = app.database();
    let order_id = place(&app, vendor_id, 3).await?;

    let rating = QualityRating::try_from(2.0)?;
    let outcome = <Db as PurchaseOrderRepository<Value>>::rate_order(db, order_id, rating, day(1)).await?;
    assert_eq!(
        outcome.map(|order| order.id),
        Err(OrderFailure::NotCompleted(OrderStatus::Pending))
    );

    let cancel = PurchaseOrderUpdate {
        status: Some(OrderStatus::Cancelled),
        ..Default::default()
    };
    let cancelled = <Db as PurchaseOrderRepository<Value>>::update_order(db, order_id, cancel, day(1))
        .await?
        .expect("pending orders can be cancelled");
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    let outcome = <Db as PurchaseOrderRepository<Value>>::complete_order(db, order_id, day(2)).await?;
    assert_eq!(
        outcome.map(|order| order.id),
        Err(OrderFailure::NotPending(OrderStatus::Cancelled))
    );

    let reopen = PurchaseOrderUpdate {
        status: Some(OrderStatus::Pending),
        ..Default::default()
    };
    let outcome = <Db as PurchaseOrderRepository<Value>>::update_order(db, order_id, reopen, day(2)).await?;
    assert_eq!(
        outcome.map(|order| order.id),
        Err(OrderFailure::IllegalStatusChange {
            from: OrderStatus::Cancelled,
            to: OrderStatus::Pending,
        })
    );

    let stored = <Db as PurchaseOrderRepository<Value>>::get_order(db, order_id)
        .await?
        .expect("order exists");
    assert_eq!(stored.status, OrderStatus::Cancelled);
    assert_eq!(stored.quality_rating, None);
    assert_eq!(stored.updated_at, day(1));
    assert_eq!(db.get_vendor_history(vendor_id).await?, Some(vec![]));

    let missing = PurchaseOrderId::new_v4();
    let outcome = <Db as PurchaseOrderRepository<Value>>::complete_order(db, missing, day(2)).await?;
    assert_eq!(outcome.map(|order| order.id), Err(OrderFailure::DoesNotExist));

    Ok(())
}

#[tokio::test]
async fn test_edit_and_delete_recalculate() -> anyhow::Result<()> {
    let (app, vendor_id) = setup().await?;
    let db = app.database();

    let late = place(&app, vendor_id, 3).await?;
    let done = place(&app, vendor_id, 3).await?;
    <Db as PurchaseOrderRepository<Value>>::complete_order(db, done, day(1))
        .await?
        .expect("order is pending");

    let vendor = db.get_vendor(vendor_id).await?.expect("vendor exists");
    assert_eq!(vendor.metrics.fulfillment_rate, 50.0);

    let update = PurchaseOrderUpdate {
        items: Some(json!([{ "sku": "NUT-10", "count": 80 }])),
        quantity: Some(80),
        ..Default::default()
    };
    let edited = <Db as PurchaseOrderRepository<Value>>::update_order(db, late, update, day(2))
        .await?
        .expect("order exists");
    assert_eq!(edited.quantity, 80);
    assert_eq!(edited.items, json!([{ "sku": "NUT-10", "count": 80 }]));

    let deleted = <Db as PurchaseOrderRepository<Value>>::delete_order(db, late, day(3))
        .await?
        .expect("order exists");
    assert_eq!(deleted.id, late);

    let vendor = db.get_vendor(vendor_id).await?.expect("vendor exists");
    assert_eq!(vendor.metrics.fulfillment_rate, 100.0);
    assert_eq!(vendor.updated_at, day(3));

    let outcome = <Db as PurchaseOrderRepository<Value>>::delete_order(db, late, day(3)).await?;
    assert_eq!(outcome.map(|order| order.id), Err(OrderFailure::DoesNotExist));

    Ok(())
}

#[tokio::test]
async fn test_history_is_immutable() -> anyhow::Result<()> {
    let (app, vendor_id) = setup().await?;
    let db = app.database();
    let order_id = place(&app, vendor_id, 3).await?;
    <Db as PurchaseOrderRepository<Value>>::complete_order(db, order_id, day(1))
        .await?
        .expect("order is pending");

    let result = sqlx::query("update performance_history set fulfillment_rate = 0.0")
        .execute(&db.writer)
        .await;
    assert!(result.is_err());

    Ok(())
}
