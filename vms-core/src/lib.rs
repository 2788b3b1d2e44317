#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the vms-core crate.
//! [vms_core]: https://docs.rs/vms_core/latest/vms_core/index.html
//! [vms_sqlite]: https://docs.rs/vms_sqlite/latest/vms_sqlite/index.html
//! [vms_axum]: https://docs.rs/vms_axum/latest/vms_axum/index.html
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for vendor management.
///
/// This module contains the vendors, purchase orders and performance snapshots
/// the service tracks, along with the performance calculator that derives a
/// vendor's metrics from its purchase orders.
///
/// The models are plain data structures, generic over the identifier and
/// datetime types chosen by a storage implementation, following the
/// principles of the hexagonal architecture.
pub mod models;

/// Interface traits for vendor management.
///
/// This module contains the "ports" in the hexagonal architecture pattern.
///
/// These traits define the contract between the domain logic and external
/// adapters (databases, HTTP servers) without specifying implementation
/// details.
pub mod ports;

/// The purchase-order lifecycle controller.
///
/// Every mutation of a purchase order is routed through this module so that
/// the owning vendor's metrics are recalculated afterwards, and a performance
/// snapshot is appended when an order is completed or rated.
pub mod lifecycle;
