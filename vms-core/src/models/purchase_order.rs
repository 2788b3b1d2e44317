use super::QualityRating;
use std::{fmt, str::FromStr};
use thiserror::Error;

/// The status of a purchase order.
///
/// Orders start out `Pending`. The lifecycle controller moves them to
/// `Completed` exactly once; `Cancelled` is only reachable by editing a
/// pending order directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum OrderStatus {
    /// Issued to the vendor, not yet fulfilled
    #[default]
    Pending,
    /// Fulfilled by the vendor
    Completed,
    /// Withdrawn before fulfillment
    Cancelled,
}

impl OrderStatus {
    /// The canonical lowercase name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a string that names no known status
#[derive(Debug, Error, PartialEq)]
#[error("unknown purchase order status: {0}")]
pub struct StatusParseError(pub String);

impl FromStr for OrderStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(StatusParseError(other.to_owned())),
        }
    }
}

/// The fields a client supplies when placing a purchase order.
///
/// `order_date` and `issue_date` default to the time of placement when
/// omitted. `Items` is an application-defined payload describing what was
/// ordered; the core never inspects it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(deny_unknown_fields)
)]
pub struct PurchaseOrderData<DateTime, VendorId, Items> {
    /// The vendor the order is placed with
    pub vendor_id: VendorId,
    /// When the order was placed
    pub order_date: Option<DateTime>,
    /// When the order was issued to the vendor
    pub issue_date: Option<DateTime>,
    /// The expected or actual delivery date
    pub delivery_date: Option<DateTime>,
    /// Application-specific description of the ordered items
    pub items: Items,
    /// The number of units ordered
    pub quantity: i64,
}

/// A direct edit of a purchase order.
///
/// Fields left as `None` are unchanged. The delivery date distinguishes an
/// absent field from an explicit `null`, which clears it. The vendor
/// reference, the acknowledgment date and the quality rating cannot be edited
/// here; the only status change allowed is `pending` to `cancelled`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        deny_unknown_fields,
        bound(deserialize = "DateTime: serde::Deserialize<'de>, Items: serde::Deserialize<'de>")
    )
)]
pub struct PurchaseOrderUpdate<DateTime, Items> {
    /// New order date
    pub order_date: Option<DateTime>,
    /// New issue date
    pub issue_date: Option<DateTime>,
    /// New delivery date; `Some(None)` clears it
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "serde_with::rust::double_option::deserialize",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub delivery_date: Option<Option<DateTime>>,
    /// New item payload
    pub items: Option<Items>,
    /// New quantity
    pub quantity: Option<i64>,
    /// New status
    pub status: Option<OrderStatus>,
}

impl<DateTime, Items> Default for PurchaseOrderUpdate<DateTime, Items> {
    fn default() -> Self {
        Self {
            order_date: None,
            issue_date: None,
            delivery_date: None,
            items: None,
            quantity: None,
            status: None,
        }
    }
}

/// A purchase order as stored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PurchaseOrderRecord<DateTime, VendorId, PurchaseOrderId, Items> {
    /// The order's unique identifier
    pub id: PurchaseOrderId,
    /// The vendor the order was placed with; fixed at creation
    pub vendor_id: VendorId,
    /// When the order was placed
    pub order_date: DateTime,
    /// When the order was issued to the vendor
    pub issue_date: DateTime,
    /// The delivery date, if known
    pub delivery_date: Option<DateTime>,
    /// When the vendor acknowledged the order, if it has
    pub acknowledgment_date: Option<DateTime>,
    /// Application-specific description of the ordered items
    pub items: Items,
    /// The number of units ordered
    pub quantity: i64,
    /// The current status
    pub status: OrderStatus,
    /// The quality rating, only ever present on completed orders
    pub quality_rating: Option<QualityRating>,
    /// When the order was created
    pub created_at: DateTime,
    /// When the order was last modified
    pub updated_at: DateTime,
}

impl<DateTime: Clone, VendorId, PurchaseOrderId, Items>
    PurchaseOrderRecord<DateTime, VendorId, PurchaseOrderId, Items>
{
    /// Build a fresh pending order from the data a client supplied.
    pub fn new(
        id: PurchaseOrderId,
        data: PurchaseOrderData<DateTime, VendorId, Items>,
        as_of: DateTime,
    ) -> Self {
        Self {
            id,
            vendor_id: data.vendor_id,
            order_date: data.order_date.unwrap_or_else(|| as_of.clone()),
            issue_date: data.issue_date.unwrap_or_else(|| as_of.clone()),
            delivery_date: data.delivery_date,
            acknowledgment_date: None,
            items: data.items,
            quantity: data.quantity,
            status: OrderStatus::Pending,
            quality_rating: None,
            created_at: as_of.clone(),
            updated_at: as_of,
        }
    }
}
