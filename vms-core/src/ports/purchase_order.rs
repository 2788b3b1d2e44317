use super::PurchaseOrderOf;
use crate::models::{OrderStatus, PurchaseOrderData, PurchaseOrderUpdate, QualityRating};
use thiserror::Error;

/// The reasons a purchase order operation can be rejected.
///
/// A rejected operation leaves storage untouched. Storage failures are not
/// represented here; they travel in the repository's own error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderFailure {
    /// The purchase order id does not resolve to an order
    #[error("purchase order does not exist")]
    DoesNotExist,

    /// A new order referenced a vendor that does not exist
    #[error("vendor does not exist")]
    UnknownVendor,

    /// The order's acknowledgment date is already set
    #[error("purchase order has already been acknowledged")]
    AlreadyAcknowledged,

    /// Only pending orders can be completed
    #[error("purchase order is {0}, only pending orders can be completed")]
    NotPending(OrderStatus),

    /// Only completed orders can be rated
    #[error("purchase order is {0}, only completed orders can be rated")]
    NotCompleted(OrderStatus),

    /// A direct edit attempted a status change other than pending to cancelled
    #[error("purchase order status cannot change from {from} to {to}")]
    IllegalStatusChange {
        /// The current status
        from: OrderStatus,
        /// The requested status
        to: OrderStatus,
    },
}

/// Repository interface for purchase orders and their lifecycle.
///
/// Every mutating method recalculates the owning vendor's metrics before it
/// returns, as a single unit of work. `complete_order` and `rate_order` also
/// append a performance snapshot for the vendor.
///
/// This trait is parameterized by the item payload type, allowing an
/// application to decide how ordered items are described.
///
/// Mutations return `Ok(Err(failure))` when the request is rejected and
/// `Err(error)` when storage fails.
pub trait PurchaseOrderRepository<Items>: super::Repository {
    /// Place a new pending order with a vendor.
    fn create_order(
        &self,
        order_id: Self::PurchaseOrderId,
        data: PurchaseOrderData<Self::DateTime, Self::VendorId, Items>,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Result<PurchaseOrderOf<Self, Items>, OrderFailure>, Self::Error>>
    + Send;

    /// Retrieve an order, returning Option::None if it does not exist.
    fn get_order(
        &self,
        order_id: Self::PurchaseOrderId,
    ) -> impl Future<Output = Result<Option<PurchaseOrderOf<Self, Items>>, Self::Error>> + Send;

    /// List orders, oldest first, optionally restricted to one vendor.
    fn list_orders(
        &self,
        vendor_id: Option<Self::VendorId>,
    ) -> impl Future<Output = Result<Vec<PurchaseOrderOf<Self, Items>>, Self::Error>> + Send;

    /// Edit the mutable fields of an order.
    fn update_order(
        &self,
        order_id: Self::PurchaseOrderId,
        update: PurchaseOrderUpdate<Self::DateTime, Items>,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Result<PurchaseOrderOf<Self, Items>, OrderFailure>, Self::Error>>
    + Send;

    /// Delete an order, returning it as it was before deletion.
    fn delete_order(
        &self,
        order_id: Self::PurchaseOrderId,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Result<PurchaseOrderOf<Self, Items>, OrderFailure>, Self::Error>>
    + Send;

    /// Record the vendor's acknowledgment of an order at `as_of`.
    ///
    /// Fails with [`OrderFailure::AlreadyAcknowledged`] on a second attempt.
    fn acknowledge_order(
        &self,
        order_id: Self::PurchaseOrderId,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Result<PurchaseOrderOf<Self, Items>, OrderFailure>, Self::Error>>
    + Send;

    /// Mark a pending order as completed.
    ///
    /// Fails with [`OrderFailure::NotPending`] for any other status.
    fn complete_order(
        &self,
        order_id: Self::PurchaseOrderId,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Result<PurchaseOrderOf<Self, Items>, OrderFailure>, Self::Error>>
    + Send;

    /// Set the quality rating of a completed order.
    ///
    /// Fails with [`OrderFailure::NotCompleted`] for any other status.
    fn rate_order(
        &self,
        order_id: Self::PurchaseOrderId,
        rating: QualityRating,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Result<PurchaseOrderOf<Self, Items>, OrderFailure>, Self::Error>>
    + Send;
}
