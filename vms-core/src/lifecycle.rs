//! Each operation follows the same shape: fetch the order, check its current
//! state, mutate it, save it, then recalculate the owning vendor's metrics.
//! Completing and rating an order also append a performance snapshot.
//!
//! The operations work against an [`OrderStore`], which the caller is
//! expected to back with a single unit of work. A rejected operation returns
//! `Ok(Err(failure))` before anything is written, so the caller can simply
//! discard the unit of work.

use crate::{
    models::{
        OrderStatus, PurchaseOrderData, PurchaseOrderRecord, PurchaseOrderUpdate, QualityRating,
        VendorMetrics,
    },
    ports::{OrderFailure, OrderStore, PurchaseOrderOf},
};

type Outcome<S, Items> =
    Result<Result<PurchaseOrderOf<S, Items>, OrderFailure>, <S as crate::ports::Repository>::Error>;

/// Place a new pending order and recalculate its vendor.
pub async fn place<S, Items>(
    store: &mut S,
    order_id: S::PurchaseOrderId,
    data: PurchaseOrderData<S::DateTime, S::VendorId, Items>,
    as_of: S::DateTime,
) -> Outcome<S, Items>
where
    S: OrderStore<Items>,
    Items: Send + Sync,
{
    if store
        .fetch_vendor_metrics(data.vendor_id.clone())
        .await?
        .is_none()
    {
        return Ok(Err(OrderFailure::UnknownVendor));
    }

    let order = PurchaseOrderRecord::new(order_id, data, as_of.clone());
    store.insert_order(&order).await?;
    recalculate::<S, Items>(store, order.vendor_id.clone(), as_of).await?;
    Ok(Ok(order))
}

/// Apply a direct edit to an order and recalculate its vendor.
///
/// The only status change accepted here is `pending` to `cancelled`;
/// restating the current status is allowed and changes nothing.
pub async fn edit<S, Items>(
    store: &mut S,
    order_id: S::PurchaseOrderId,
    update: PurchaseOrderUpdate<S::DateTime, Items>,
    as_of: S::DateTime,
) -> Outcome<S, Items>
where
    S: OrderStore<Items>,
    Items: Send + Sync,
{
    let Some(mut order) = store.fetch_order(order_id).await? else {
        return Ok(Err(OrderFailure::DoesNotExist));
    };

    if let Some(status) = update.status {
        match (order.status, status) {
            (from, to) if from == to => {}
            (OrderStatus::Pending, OrderStatus::Cancelled) => order.status = status,
            (from, to) => return Ok(Err(OrderFailure::IllegalStatusChange { from, to })),
        }
    }

    if let Some(order_date) = update.order_date {
        order.order_date = order_date;
    }
    if let Some(issue_date) = update.issue_date {
        order.issue_date = issue_date;
    }
    if let Some(delivery_date) = update.delivery_date {
        order.delivery_date = delivery_date;
    }
    if let Some(items) = update.items {
        order.items = items;
    }
    if let Some(quantity) = update.quantity {
        order.quantity = quantity;
    }
    order.updated_at = as_of.clone();

    store.save_order(&order).await?;
    recalculate::<S, Items>(store, order.vendor_id.clone(), as_of).await?;
    Ok(Ok(order))
}

/// Remove an order and recalculate its vendor.
pub async fn remove<S, Items>(
    store: &mut S,
    order_id: S::PurchaseOrderId,
    as_of: S::DateTime,
) -> Outcome<S, Items>
where
    S: OrderStore<Items>,
    Items: Send + Sync,
{
    let Some(order) = store.fetch_order(order_id.clone()).await? else {
        return Ok(Err(OrderFailure::DoesNotExist));
    };

    store.remove_order(order_id).await?;
    recalculate::<S, Items>(store, order.vendor_id.clone(), as_of).await?;
    Ok(Ok(order))
}

/// Stamp an order as acknowledged at `as_of`.
///
/// Acknowledgment happens at most once. No performance snapshot is taken.
pub async fn acknowledge<S, Items>(
    store: &mut S,
    order_id: S::PurchaseOrderId,
    as_of: S::DateTime,
) -> Outcome<S, Items>
where
    S: OrderStore<Items>,
    Items: Send + Sync,
{
    let Some(mut order) = store.fetch_order(order_id).await? else {
        return Ok(Err(OrderFailure::DoesNotExist));
    };
    if order.acknowledgment_date.is_some() {
        return Ok(Err(OrderFailure::AlreadyAcknowledged));
    }

    order.acknowledgment_date = Some(as_of.clone());
    order.updated_at = as_of.clone();

    store.save_order(&order).await?;
    recalculate::<S, Items>(store, order.vendor_id.clone(), as_of).await?;
    Ok(Ok(order))
}

/// Move a pending order to completed, then snapshot the vendor's metrics.
pub async fn complete<S, Items>(
    store: &mut S,
    order_id: S::PurchaseOrderId,
    as_of: S::DateTime,
) -> Outcome<S, Items>
where
    S: OrderStore<Items>,
    Items: Send + Sync,
{
    let Some(mut order) = store.fetch_order(order_id).await? else {
        return Ok(Err(OrderFailure::DoesNotExist));
    };
    if order.status != OrderStatus::Pending {
        return Ok(Err(OrderFailure::NotPending(order.status)));
    }

    order.status = OrderStatus::Completed;
    order.updated_at = as_of.clone();

    store.save_order(&order).await?;
    recalculate::<S, Items>(store, order.vendor_id.clone(), as_of.clone()).await?;
    record::<S, Items>(store, order.vendor_id.clone(), as_of).await?;
    Ok(Ok(order))
}

/// Rate a completed order, then snapshot the vendor's metrics.
pub async fn rate<S, Items>(
    store: &mut S,
    order_id: S::PurchaseOrderId,
    rating: QualityRating,
    as_of: S::DateTime,
) -> Outcome<S, Items>
where
    S: OrderStore<Items>,
    Items: Send + Sync,
{
    let Some(mut order) = store.fetch_order(order_id).await? else {
        return Ok(Err(OrderFailure::DoesNotExist));
    };
    if order.status != OrderStatus::Completed {
        return Ok(Err(OrderFailure::NotCompleted(order.status)));
    }

    order.quality_rating = Some(rating);
    order.updated_at = as_of.clone();

    store.save_order(&order).await?;
    recalculate::<S, Items>(store, order.vendor_id.clone(), as_of.clone()).await?;
    record::<S, Items>(store, order.vendor_id.clone(), as_of).await?;
    Ok(Ok(order))
}

/// Recompute a vendor's metrics from all of its orders and persist them.
///
/// A vendor without orders keeps its stored metrics. Returns the metrics
/// that were written, if any.
pub async fn recalculate<S, Items>(
    store: &mut S,
    vendor_id: S::VendorId,
    as_of: S::DateTime,
) -> Result<Option<VendorMetrics>, S::Error>
where
    S: OrderStore<Items>,
    Items: Send + Sync,
{
    let orders = store.fetch_vendor_orders(vendor_id.clone()).await?;
    let Some(metrics) = VendorMetrics::calculate(&orders) else {
        return Ok(None);
    };

    store.save_vendor_metrics(vendor_id, metrics, as_of).await?;
    Ok(Some(metrics))
}

/// Append a snapshot of a vendor's current metrics to its history.
///
/// Every call appends, even when the metrics have not changed since the
/// previous snapshot. Returns false if the vendor does not exist.
pub async fn record<S, Items>(
    store: &mut S,
    vendor_id: S::VendorId,
    as_of: S::DateTime,
) -> Result<bool, S::Error>
where
    S: OrderStore<Items>,
    Items: Send + Sync,
{
    match store.fetch_vendor_metrics(vendor_id.clone()).await? {
        Some(metrics) => {
            store.append_history(vendor_id, metrics, as_of).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::PurchaseOrderRecord, ports::Repository};
    use std::{collections::BTreeMap, convert::Infallible};
    use time::{Duration, OffsetDateTime, macros::datetime};

    const T: OffsetDateTime = datetime!(2024-05-06 08:00 UTC);
    const VENDOR: u32 = 7;

    type Items = &'static str;
    type Order = PurchaseOrderRecord<OffsetDateTime, u32, u32, Items>;

    /// A store kept entirely in memory
    #[derive(Default)]
    struct MemoryStore {
        orders: BTreeMap<u32, Order>,
        vendors: BTreeMap<u32, VendorMetrics>,
        history: Vec<(u32, VendorMetrics, OffsetDateTime)>,
    }

    impl MemoryStore {
        fn with_vendor(vendor_id: u32) -> Self {
            let mut store = Self::default();
            store.vendors.insert(vendor_id, VendorMetrics::default());
            store
        }

        fn metrics(&self) -> VendorMetrics {
            self.vendors[&VENDOR]
        }
    }

    impl Repository for MemoryStore {
        type Error = Infallible;
        type DateTime = OffsetDateTime;
        type VendorId = u32;
        type PurchaseOrderId = u32;
        type PerformanceId = usize;
    }

    impl OrderStore<Items> for MemoryStore {
        async fn fetch_order(&mut self, order_id: u32) -> Result<Option<Order>, Infallible> {
            Ok(self.orders.get(&order_id).cloned())
        }

        async fn fetch_vendor_orders(&mut self, vendor_id: u32) -> Result<Vec<Order>, Infallible> {
            Ok(self
                .orders
                .values()
                .filter(|order| order.vendor_id == vendor_id)
                .cloned()
                .collect())
        }

        async fn insert_order(&mut self, order: &Order) -> Result<(), Infallible> {
            self.orders.insert(order.id, order.clone());
            Ok(())
        }

        async fn save_order(&mut self, order: &Order) -> Result<(), Infallible> {
            self.orders.insert(order.id, order.clone());
            Ok(())
        }

        async fn remove_order(&mut self, order_id: u32) -> Result<(), Infallible> {
            self.orders.remove(&order_id);
            Ok(())
        }

        async fn fetch_vendor_metrics(
            &mut self,
            vendor_id: u32,
        ) -> Result<Option<VendorMetrics>, Infallible> {
            Ok(self.vendors.get(&vendor_id).copied())
        }

        async fn save_vendor_metrics(
            &mut self,
            vendor_id: u32,
            metrics: VendorMetrics,
            _as_of: OffsetDateTime,
        ) -> Result<(), Infallible> {
            self.vendors.insert(vendor_id, metrics);
            Ok(())
        }

        async fn append_history(
            &mut self,
            vendor_id: u32,
            metrics: VendorMetrics,
            as_of: OffsetDateTime,
        ) -> Result<(), Infallible> {
            self.history.push((vendor_id, metrics, as_of));
            Ok(())
        }
    }

    fn data(
        delivery_date: Option<OffsetDateTime>,
    ) -> PurchaseOrderData<OffsetDateTime, u32, Items> {
        PurchaseOrderData {
            vendor_id: VENDOR,
            order_date: None,
            issue_date: Some(T),
            delivery_date,
            items: "widgets",
            quantity: 10,
        }
    }

    async fn placed(store: &mut MemoryStore, order_id: u32) -> Order {
        let delivery = Some(T + Duration::days(3));
        place::<_, Items>(store, order_id, data(delivery), T)
            .await
            .unwrap()
            .unwrap()
    }

    fn rating(value: f64) -> QualityRating {
        QualityRating::try_from(value).unwrap()
    }

    #[tokio::test]
    async fn recalculating_without_orders_keeps_metrics() {
        let mut store = MemoryStore::with_vendor(VENDOR);
        let written = recalculate::<_, Items>(&mut store, VENDOR, T).await.unwrap();
        assert_eq!(written, None);
        assert_eq!(store.metrics(), VendorMetrics::default());
    }

    #[tokio::test]
    async fn placing_requires_a_known_vendor() {
        let mut store = MemoryStore::default();
        let outcome = place::<_, Items>(&mut store, 1, data(None), T).await.unwrap();
        assert_eq!(outcome, Err(OrderFailure::UnknownVendor));
        assert!(store.orders.is_empty());
    }

    #[tokio::test]
    async fn placing_defaults_dates_and_recalculates() {
        let mut store = MemoryStore::with_vendor(VENDOR);
        let order = place::<_, Items>(&mut store, 1, data(None), T + Duration::hours(1))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.issue_date, T);
        assert_eq!(order.order_date, T + Duration::hours(1));
        assert_eq!(store.metrics().fulfillment_rate, 0.0);
        assert!(store.history.is_empty());
    }

    #[tokio::test]
    async fn acknowledge_is_exactly_once() {
        let mut store = MemoryStore::with_vendor(VENDOR);
        placed(&mut store, 1).await;

        let first = acknowledge::<_, Items>(&mut store, 1, T + Duration::days(2))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.acknowledgment_date, Some(T + Duration::days(2)));
        assert_eq!(store.metrics().average_response_time, 2.0);

        let second = acknowledge::<_, Items>(&mut store, 1, T + Duration::days(5))
            .await
            .unwrap();
        assert_eq!(second, Err(OrderFailure::AlreadyAcknowledged));
        assert_eq!(
            store.orders[&1].acknowledgment_date,
            Some(T + Duration::days(2))
        );
        assert!(store.history.is_empty());
    }

    #[tokio::test]
    async fn complete_is_exactly_once() {
        let mut store = MemoryStore::with_vendor(VENDOR);
        placed(&mut store, 1).await;

        let order = complete::<_, Items>(&mut store, 1, T).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(store.history.len(), 1);

        let again = complete::<_, Items>(&mut store, 1, T).await.unwrap();
        assert_eq!(again, Err(OrderFailure::NotPending(OrderStatus::Completed)));
        assert_eq!(store.history.len(), 1);
    }

    #[tokio::test]
    async fn rating_a_pending_order_is_rejected() {
        let mut store = MemoryStore::with_vendor(VENDOR);
        placed(&mut store, 1).await;

        let outcome = rate::<_, Items>(&mut store, 1, rating(4.0), T).await.unwrap();
        assert_eq!(outcome, Err(OrderFailure::NotCompleted(OrderStatus::Pending)));
        assert_eq!(store.orders[&1].quality_rating, None);
        assert!(store.history.is_empty());
    }

    #[tokio::test]
    async fn unknown_orders_are_not_found() {
        let mut store = MemoryStore::with_vendor(VENDOR);
        assert_eq!(
            acknowledge::<_, Items>(&mut store, 9, T).await.unwrap(),
            Err(OrderFailure::DoesNotExist)
        );
        assert_eq!(
            complete::<_, Items>(&mut store, 9, T).await.unwrap(),
            Err(OrderFailure::DoesNotExist)
        );
        assert_eq!(
            rate::<_, Items>(&mut store, 9, rating(1.0), T).await.unwrap(),
            Err(OrderFailure::DoesNotExist)
        );
        assert_eq!(
            remove::<_, Items>(&mut store, 9, T).await.unwrap(),
            Err(OrderFailure::DoesNotExist)
        );
    }

    #[tokio::test]
    async fn edits_only_cancel_pending_orders() {
        let mut store = MemoryStore::with_vendor(VENDOR);
        placed(&mut store, 1).await;
        placed(&mut store, 2).await;
        complete::<_, Items>(&mut store, 2, T).await.unwrap().unwrap();

        let to_completed = PurchaseOrderUpdate {
            status: Some(OrderStatus::Completed),
            ..Default::default()
        };
        assert_eq!(
            edit::<_, Items>(&mut store, 1, to_completed, T).await.unwrap(),
            Err(OrderFailure::IllegalStatusChange {
                from: OrderStatus::Pending,
                to: OrderStatus::Completed,
            })
        );

        let to_cancelled = PurchaseOrderUpdate {
            status: Some(OrderStatus::Cancelled),
            ..Default::default()
        };
        assert_eq!(
            edit::<_, Items>(&mut store, 2, to_cancelled.clone(), T).await.unwrap(),
            Err(OrderFailure::IllegalStatusChange {
                from: OrderStatus::Completed,
                to: OrderStatus::Cancelled,
            })
        );

        let cancelled = edit::<_, Items>(&mut store, 1, to_cancelled, T).await.unwrap().unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(store.metrics().fulfillment_rate, 50.0);
    }

    #[tokio::test]
    async fn edits_recalculate_without_history() {
        let mut store = MemoryStore::with_vendor(VENDOR);
        placed(&mut store, 1).await;
        complete::<_, Items>(&mut store, 1, T).await.unwrap().unwrap();
        assert_eq!(store.metrics().on_time_delivery_rate, 100.0);

        let late = PurchaseOrderUpdate {
            delivery_date: Some(Some(T - Duration::days(1))),
            quantity: Some(3),
            ..Default::default()
        };
        let order = edit::<_, Items>(&mut store, 1, late, T + Duration::days(1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.quantity, 3);
        assert_eq!(order.updated_at, T + Duration::days(1));
        assert_eq!(store.metrics().on_time_delivery_rate, 0.0);
        assert_eq!(store.history.len(), 1);
    }

    #[tokio::test]
    async fn clearing_the_delivery_date_drops_on_time_rate() {
        let mut store = MemoryStore::with_vendor(VENDOR);
        placed(&mut store, 1).await;
        complete::<_, Items>(&mut store, 1, T).await.unwrap().unwrap();
        assert_eq!(store.metrics().on_time_delivery_rate, 100.0);

        // omitting the field leaves the date alone
        let untouched = edit::<_, Items>(&mut store, 1, PurchaseOrderUpdate::default(), T)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(untouched.delivery_date, Some(T + Duration::days(3)));

        let cleared = PurchaseOrderUpdate {
            delivery_date: Some(None),
            ..Default::default()
        };
        let order = edit::<_, Items>(&mut store, 1, cleared, T).await.unwrap().unwrap();
        assert_eq!(order.delivery_date, None);
        assert_eq!(store.metrics().on_time_delivery_rate, 0.0);
    }

    #[tokio::test]
    async fn removal_recalculates_remaining_orders() {
        let mut store = MemoryStore::with_vendor(VENDOR);
        placed(&mut store, 1).await;
        placed(&mut store, 2).await;
        complete::<_, Items>(&mut store, 1, T).await.unwrap().unwrap();
        assert_eq!(store.metrics().fulfillment_rate, 50.0);

        remove::<_, Items>(&mut store, 2, T).await.unwrap().unwrap();
        assert_eq!(store.metrics().fulfillment_rate, 100.0);

        // the last order leaves nothing to divide by, so the metrics stay put
        remove::<_, Items>(&mut store, 1, T).await.unwrap().unwrap();
        assert_eq!(store.metrics().fulfillment_rate, 100.0);
    }

    #[tokio::test]
    async fn history_appends_on_every_call() {
        let mut store = MemoryStore::with_vendor(VENDOR);
        assert!(record::<_, Items>(&mut store, VENDOR, T).await.unwrap());
        assert!(record::<_, Items>(&mut store, VENDOR, T).await.unwrap());
        assert!(!record::<_, Items>(&mut store, 99, T).await.unwrap());
        assert_eq!(store.history.len(), 2);
    }

    #[tokio::test]
    async fn full_lifecycle() {
        let mut store = MemoryStore::with_vendor(VENDOR);
        placed(&mut store, 1).await;

        acknowledge::<_, Items>(&mut store, 1, T + Duration::days(1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(store.metrics().average_response_time, 1.0);

        complete::<_, Items>(&mut store, 1, T + Duration::days(2))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(store.metrics().on_time_delivery_rate, 100.0);
        assert_eq!(store.metrics().fulfillment_rate, 100.0);
        assert_eq!(store.history.len(), 1);

        rate::<_, Items>(&mut store, 1, rating(5.0), T + Duration::days(3))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(store.metrics().quality_rating_avg, 5.0);
        assert_eq!(store.history.len(), 2);

        let (vendor_id, snapshot, date) = store.history[1];
        assert_eq!(vendor_id, VENDOR);
        assert_eq!(snapshot, store.metrics());
        assert_eq!(date, T + Duration::days(3));
    }
}
