mod performance;
mod purchase_order;
mod rating;
mod vendor;

pub use performance::{PerformanceRecord, VendorMetrics};
pub use purchase_order::{
    OrderStatus, PurchaseOrderData, PurchaseOrderRecord, PurchaseOrderUpdate, StatusParseError,
};
pub use rating::{QualityRating, RatingError};
pub use vendor::{VendorData, VendorPerformance, VendorRecord};
