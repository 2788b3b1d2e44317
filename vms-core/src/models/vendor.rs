use super::VendorMetrics;

/// The client-authored fields of a vendor.
///
/// Performance metrics are deliberately absent: they are derived from the
/// vendor's purchase orders and can only change through recalculation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VendorData {
    /// The display name of the vendor
    pub name: String,
    /// A free-text postal address
    pub address: String,
    /// Free-text contact details (phone, email, contact person)
    pub contact_details: String,
}

/// A vendor as stored, combining its identity with its current metrics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VendorRecord<DateTime, VendorId> {
    /// The vendor's unique identifier
    pub id: VendorId,

    /// The client-authored fields
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub data: VendorData,

    /// The metrics as of the most recent recalculation
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub metrics: VendorMetrics,

    /// When the vendor was created
    pub created_at: DateTime,
    /// When the vendor was last modified, either by a client or a recalculation
    pub updated_at: DateTime,
}

/// The performance summary of a single vendor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VendorPerformance<VendorId> {
    /// The vendor these metrics belong to
    pub vendor_id: VendorId,
    /// The current metrics
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub metrics: VendorMetrics,
}

impl<DateTime, VendorId> From<VendorRecord<DateTime, VendorId>> for VendorPerformance<VendorId> {
    fn from(value: VendorRecord<DateTime, VendorId>) -> Self {
        Self {
            vendor_id: value.id,
            metrics: value.metrics,
        }
    }
}
