use serde_json::Value;
use vms_core::{
    models::{PurchaseOrderData, VendorData},
    ports::Application,
};
use vms_sqlite::{
    Db,
    types::{DateTime, PurchaseOrderId, VendorId},
};

#[derive(Clone)]
pub struct TestApp(pub Db);

impl Application for TestApp {
    // Order items are passed through as arbitrary JSON
    type Items = Value;
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.0
    }

    fn now(&self) -> DateTime {
        time::OffsetDateTime::now_utc().into()
    }

    fn generate_vendor_id(&self, _data: &VendorData) -> VendorId {
        uuid::Uuid::new_v4().into()
    }

    fn generate_purchase_order_id(
        &self,
        _data: &PurchaseOrderData<DateTime, VendorId, Value>,
    ) -> PurchaseOrderId {
        uuid::Uuid::new_v4().into()
    }
}
