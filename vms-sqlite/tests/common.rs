#![allow(dead_code)]

use serde_json::{Value, json};
use time::{Duration, OffsetDateTime, macros::datetime};
use vms_core::{
    models::{PurchaseOrderData, VendorData},
    ports::Application,
};
use vms_sqlite::{
    Db,
    config::SqliteConfig,
    types::{DateTime, PurchaseOrderId, VendorId},
};

pub const T0: OffsetDateTime = datetime!(2024-03-01 09:00 UTC);

pub struct TestApp(pub Db);

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        Ok(Self(Db::open(&SqliteConfig::default()).await?))
    }
}

impl Application for TestApp {
    type Items = Value;
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.0
    }

    fn now(&self) -> DateTime {
        OffsetDateTime::now_utc().into()
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

/// `T0` shifted by a number of days
pub fn day(days: i64) -> DateTime {
    (T0 + Duration::days(days)).into()
}

pub fn acme() -> VendorData {
    VendorData {
        name: "Acme Supplies".into(),
        address: "1 Industrial Way".into(),
        contact_details: "orders@acme.test".into(),
    }
}

pub fn order_for(
    vendor_id: VendorId,
    delivery_date: Option<DateTime>,
) -> PurchaseOrderData<DateTime, VendorId, Value> {
    PurchaseOrderData {
        vendor_id,
        order_date: None,
        issue_date: None,
        delivery_date,
        items: json!([{ "sku": "BOLT-10", "count": 40 }]),
        quantity: 40,
    }
}
