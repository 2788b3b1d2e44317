//! Type definitions for the SQLite implementation.
//!
//! This module contains both public types used throughout the crate and internal
//! types used for database row mapping. The public types include strongly-typed
//! IDs and datetime representations that ensure type safety across the system.

use vms_core::models::{
    PerformanceRecord, PurchaseOrderRecord, QualityRating, VendorData, VendorMetrics,
    VendorRecord,
};

mod datetime;
pub use datetime::DateTime;

mod ids;
pub use ids::{PerformanceId, PurchaseOrderId, VendorId};

/// A vendor as returned by [`crate::Db`]
pub type Vendor = VendorRecord<DateTime, VendorId>;

/// A purchase order as returned by [`crate::Db`]
pub type PurchaseOrder<Items> = PurchaseOrderRecord<DateTime, VendorId, PurchaseOrderId, Items>;

/// A performance snapshot as returned by [`crate::Db`]
pub type Performance = PerformanceRecord<DateTime, VendorId, PerformanceId>;

fn decode_error<E: std::error::Error + Send + Sync + 'static>(error: E) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(error))
}

#[derive(sqlx::FromRow)]
pub(crate) struct VendorRow {
    pub id: VendorId,
    pub name: String,
    pub address: String,
    pub contact_details: String,
    pub on_time_delivery_rate: f64,
    pub quality_rating_avg: f64,
    pub average_response_time: f64,
    pub fulfillment_rate: f64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<VendorRow> for Vendor {
    fn from(row: VendorRow) -> Self {
        Self {
            id: row.id,
            data: VendorData {
                name: row.name,
                address: row.address,
                contact_details: row.contact_details,
            },
            metrics: VendorMetrics {
                on_time_delivery_rate: row.on_time_delivery_rate,
                quality_rating_avg: row.quality_rating_avg,
                average_response_time: row.average_response_time,
                fulfillment_rate: row.fulfillment_rate,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct MetricsRow {
    pub on_time_delivery_rate: f64,
    pub quality_rating_avg: f64,
    pub average_response_time: f64,
    pub fulfillment_rate: f64,
}

impl From<MetricsRow> for VendorMetrics {
    fn from(row: MetricsRow) -> Self {
        Self {
            on_time_delivery_rate: row.on_time_delivery_rate,
            quality_rating_avg: row.quality_rating_avg,
            average_response_time: row.average_response_time,
            fulfillment_rate: row.fulfillment_rate,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct PurchaseOrderRow<Items> {
    pub id: PurchaseOrderId,
    pub vendor_id: VendorId,
    pub order_date: DateTime,
    pub issue_date: DateTime,
    pub delivery_date: Option<DateTime>,
    pub acknowledgment_date: Option<DateTime>,
    pub items: sqlx::types::Json<Items>,
    pub quantity: i64,
    pub status: String,
    pub quality_rating: Option<f64>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl<Items> PurchaseOrderRow<Items> {
    /// The status and rating columns are constrained by the schema, but they
    /// are still validated on the way out.
    pub fn into_record(self) -> Result<PurchaseOrder<Items>, sqlx::Error> {
        Ok(PurchaseOrderRecord {
            id: self.id,
            vendor_id: self.vendor_id,
            order_date: self.order_date,
            issue_date: self.issue_date,
            delivery_date: self.delivery_date,
            acknowledgment_date: self.acknowledgment_date,
            items: self.items.0,
            quantity: self.quantity,
            status: self.status.parse().map_err(decode_error)?,
            quality_rating: self
                .quality_rating
                .map(QualityRating::try_from)
                .transpose()
                .map_err(decode_error)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct PerformanceRow {
    pub id: PerformanceId,
    pub vendor_id: VendorId,
    pub date: DateTime,
    #[sqlx(flatten)]
    pub metrics: MetricsRow,
}

impl From<PerformanceRow> for Performance {
    fn from(row: PerformanceRow) -> Self {
        Self {
            id: row.id,
            vendor_id: row.vendor_id,
            date: row.date,
            metrics: row.metrics.into(),
        }
    }
}
