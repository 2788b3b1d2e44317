//! The concrete application served by `vmsd`.

use serde_json::Value;
use vms_core::{
    models::{PurchaseOrderData, VendorData},
    ports::Application,
};
use vms_sqlite::{
    Db,
    types::{DateTime, PurchaseOrderId, VendorId},
};

/// Serves the SQLite backend, with purchase order items kept as free-form
/// JSON, the wall clock as the time source and random v4 identifiers.
#[derive(Clone)]
pub struct VendorApp {
    /// Database connection for persistent storage
    pub db: Db,
}

impl Application for VendorApp {
    type Items = Value;
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn now(&self) -> DateTime {
        time::OffsetDateTime::now_utc().into()
    }

    fn generate_vendor_id(&self, _data: &VendorData) -> VendorId {
        VendorId::new_v4()
    }

    fn generate_purchase_order_id(
        &self,
        _data: &PurchaseOrderData<DateTime, VendorId, Value>,
    ) -> PurchaseOrderId {
        PurchaseOrderId::new_v4()
    }
}
