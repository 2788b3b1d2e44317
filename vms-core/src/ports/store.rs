use super::PurchaseOrderOf;
use crate::models::VendorMetrics;

/// The persistence boundary used by the lifecycle controller.
///
/// An implementation is expected to represent one unit of work (for example
/// an open database transaction): the controller performs a sequence of reads
/// and writes through it, and the caller decides whether to commit them.
pub trait OrderStore<Items>: super::Repository {
    /// Fetch an order by id.
    fn fetch_order(
        &mut self,
        order_id: Self::PurchaseOrderId,
    ) -> impl Future<Output = Result<Option<PurchaseOrderOf<Self, Items>>, Self::Error>> + Send;

    /// Fetch every order placed with a vendor, regardless of status.
    fn fetch_vendor_orders(
        &mut self,
        vendor_id: Self::VendorId,
    ) -> impl Future<Output = Result<Vec<PurchaseOrderOf<Self, Items>>, Self::Error>> + Send;

    /// Insert a new order.
    fn insert_order(
        &mut self,
        order: &PurchaseOrderOf<Self, Items>,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Overwrite the stored state of an existing order.
    fn save_order(
        &mut self,
        order: &PurchaseOrderOf<Self, Items>,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Remove an order.
    fn remove_order(
        &mut self,
        order_id: Self::PurchaseOrderId,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Fetch a vendor's current metrics, or None if the vendor does not exist.
    fn fetch_vendor_metrics(
        &mut self,
        vendor_id: Self::VendorId,
    ) -> impl Future<Output = Result<Option<VendorMetrics>, Self::Error>> + Send;

    /// Overwrite a vendor's metrics.
    fn save_vendor_metrics(
        &mut self,
        vendor_id: Self::VendorId,
        metrics: VendorMetrics,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Append a performance snapshot for a vendor.
    fn append_history(
        &mut self,
        vendor_id: Self::VendorId,
        metrics: VendorMetrics,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
