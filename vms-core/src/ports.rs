use crate::models::{PerformanceRecord, PurchaseOrderRecord, VendorRecord};
use time::OffsetDateTime;

mod application;
mod purchase_order;
mod store;
mod vendor;

pub use application::Application;
pub use purchase_order::{OrderFailure, PurchaseOrderRepository};
pub use store::OrderStore;
pub use vendor::VendorRepository;

/// Base trait shared by every storage adapter.
///
/// It fixes the concrete error, datetime and identifier types an
/// implementation works with. The datetime type must be convertible into an
/// [`OffsetDateTime`] so that elapsed times can be measured by the
/// performance calculator.
pub trait Repository: Sized + Send + Sync {
    /// The error type for underlying storage failures
    type Error: std::error::Error + Send + Sync + 'static;

    /// A timestamp type
    type DateTime: Clone + Ord + Into<OffsetDateTime> + Send + Sync;

    /// The vendor identifier
    type VendorId: Clone + Eq + Send + Sync;

    /// The purchase order identifier
    type PurchaseOrderId: Clone + Eq + Send + Sync;

    /// The identifier of a performance snapshot
    type PerformanceId: Clone + Eq + Send + Sync;
}

/// A vendor record with the identifier types of repository `R`
pub type VendorOf<R> = VendorRecord<<R as Repository>::DateTime, <R as Repository>::VendorId>;

/// A purchase order record with the identifier types of repository `R`
pub type PurchaseOrderOf<R, Items> = PurchaseOrderRecord<
    <R as Repository>::DateTime,
    <R as Repository>::VendorId,
    <R as Repository>::PurchaseOrderId,
    Items,
>;

/// A performance snapshot with the identifier types of repository `R`
pub type PerformanceOf<R> = PerformanceRecord<
    <R as Repository>::DateTime,
    <R as Repository>::VendorId,
    <R as Repository>::PerformanceId,
>;
