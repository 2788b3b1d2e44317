use super::{PurchaseOrderRepository, Repository, VendorRepository};
use crate::models::{PurchaseOrderData, VendorData};

/// An application ties a storage implementation to the policies that the
/// core leaves open: the clock and the generation of new identifiers.
pub trait Application {
    /// The payload type describing the items of a purchase order
    type Items;

    /// The storage implementation
    type Repository: VendorRepository + PurchaseOrderRepository<Self::Items>;

    /// Access the storage implementation
    fn database(&self) -> &Self::Repository;

    /// The current time
    fn now(&self) -> <Self::Repository as Repository>::DateTime;

    /// Produce the id of a vendor about to be created
    fn generate_vendor_id(&self, data: &VendorData) -> <Self::Repository as Repository>::VendorId;

    /// Produce the id of a purchase order about to be placed
    fn generate_purchase_order_id(
        &self,
        data: &PurchaseOrderData<
            <Self::Repository as Repository>::DateTime,
            <Self::Repository as Repository>::VendorId,
            Self::Items,
        >,
    ) -> <Self::Repository as Repository>::PurchaseOrderId;
}
