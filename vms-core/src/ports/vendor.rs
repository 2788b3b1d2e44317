use super::{PerformanceOf, VendorOf};
use crate::models::VendorData;

/// Repository interface for vendor CRUD operations and performance history.
///
/// Nothing in this trait writes a vendor's metrics: they are maintained by
/// the lifecycle controller through [`super::OrderStore`].
pub trait VendorRepository: super::Repository {
    /// Create a new vendor with all metrics zeroed.
    fn create_vendor(
        &self,
        vendor_id: Self::VendorId,
        data: VendorData,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<VendorOf<Self>, Self::Error>> + Send;

    /// Retrieve a vendor, returning Option::None if it does not exist.
    fn get_vendor(
        &self,
        vendor_id: Self::VendorId,
    ) -> impl Future<Output = Result<Option<VendorOf<Self>>, Self::Error>> + Send;

    /// List every vendor, oldest first.
    fn list_vendors(&self) -> impl Future<Output = Result<Vec<VendorOf<Self>>, Self::Error>> + Send;

    /// Replace the client-authored fields of a vendor.
    ///
    /// # Returns
    ///
    /// - Ok(Some(record)) with the updated vendor if successful
    /// - Ok(None) if no such vendor exists
    /// - Err otherwise
    fn update_vendor(
        &self,
        vendor_id: Self::VendorId,
        data: VendorData,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Option<VendorOf<Self>>, Self::Error>> + Send;

    /// Delete a vendor together with its purchase orders and performance history.
    ///
    /// # Returns
    ///
    /// - Ok(Some(record)) with the vendor as it was before deletion
    /// - Ok(None) if no such vendor exists
    /// - Err otherwise
    fn delete_vendor(
        &self,
        vendor_id: Self::VendorId,
    ) -> impl Future<Output = Result<Option<VendorOf<Self>>, Self::Error>> + Send;

    /// Retrieve the performance snapshots of a vendor, newest first.
    ///
    /// Returns Option::None if the vendor does not exist.
    fn get_vendor_history(
        &self,
        vendor_id: Self::VendorId,
    ) -> impl Future<Output = Result<Option<Vec<PerformanceOf<Self>>>, Self::Error>> + Send;
}
