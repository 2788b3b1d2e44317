//! Repository trait implementations for the SQLite database.

use crate::{
    Db,
    types::{DateTime, PerformanceId, PurchaseOrderId, VendorId},
};
use vms_core::ports::Repository;

mod purchase_order;
mod store;
mod vendor;

impl Repository for Db {
    type Error = sqlx::Error;
    type DateTime = DateTime;
    type VendorId = VendorId;
    type PurchaseOrderId = PurchaseOrderId;
    type PerformanceId = PerformanceId;
}
