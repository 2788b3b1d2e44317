use super::{OrderStatus, PurchaseOrderRecord};
use time::OffsetDateTime;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// The four performance metrics tracked for every vendor.
///
/// Both rates are percentages in `[0, 100]`, the response time is measured
/// in (fractional) days and the quality average lives on the rating scale.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VendorMetrics {
    /// Share of orders completed with a delivery date on or after the issue date
    pub on_time_delivery_rate: f64,
    /// Mean quality rating over the rated orders
    pub quality_rating_avg: f64,
    /// Mean days between issue and acknowledgment over acknowledged orders
    pub average_response_time: f64,
    /// Share of orders that reached completion
    pub fulfillment_rate: f64,
}

impl VendorMetrics {
    /// Derive a vendor's metrics from all of its purchase orders, whatever their status.
    ///
    /// Returns `None` for an empty slice: with no orders there is nothing to
    /// divide by, and the vendor's stored metrics are left as they are.
    pub fn calculate<DateTime, VendorId, PurchaseOrderId, Items>(
        orders: &[PurchaseOrderRecord<DateTime, VendorId, PurchaseOrderId, Items>],
    ) -> Option<Self>
    where
        DateTime: Clone + PartialOrd + Into<OffsetDateTime>,
    {
        if orders.is_empty() {
            return None;
        }

        let mut completed = 0usize;
        let mut on_time = 0usize;
        let mut ratings = Mean::default();
        let mut response_days = Mean::default();

        for order in orders {
            if order.status == OrderStatus::Completed {
                completed += 1;
                if order
                    .delivery_date
                    .as_ref()
                    .is_some_and(|delivered| *delivered >= order.issue_date)
                {
                    on_time += 1;
                }
            }

            if let Some(rating) = order.quality_rating {
                ratings.push(rating.value());
            }

            if let Some(acknowledged) = &order.acknowledgment_date {
                response_days.push(elapsed_days(&order.issue_date, acknowledged));
            }
        }

        let total = orders.len() as f64;
        Some(Self {
            on_time_delivery_rate: on_time as f64 / total * 100.0,
            quality_rating_avg: ratings.value(),
            average_response_time: response_days.value(),
            fulfillment_rate: completed as f64 / total * 100.0,
        })
    }
}

fn elapsed_days<DateTime: Clone + Into<OffsetDateTime>>(from: &DateTime, to: &DateTime) -> f64 {
    let from: OffsetDateTime = from.clone().into();
    let to: OffsetDateTime = to.clone().into();
    (to - from).as_seconds_f64() / SECONDS_PER_DAY
}

// running mean that reports 0 when nothing was observed
#[derive(Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn value(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// A snapshot of a vendor's metrics, appended after each lifecycle event
/// that completes or rates an order. Snapshots are never modified.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerformanceRecord<DateTime, VendorId, PerformanceId> {
    /// The snapshot's unique identifier
    pub id: PerformanceId,
    /// The vendor the snapshot describes
    pub vendor_id: VendorId,
    /// When the snapshot was taken
    pub date: DateTime,
    /// The metrics at that time
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub metrics: VendorMetrics,
}
