//! REST API endpoints for vendor operations.
//!
//! Vendors are created and edited through their identity fields only. The
//! performance metrics they carry are derived from their purchase orders and
//! are exposed read-only, together with the history of snapshots taken as
//! orders are completed and rated.

use crate::{ApiApplication, storage_error};
use aide::{
    axum::{
        ApiRouter,
        routing::{get, get_with},
    },
    transform::TransformOperation,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{Level, event};
use vms_core::{
    models::{VendorData, VendorPerformance},
    ports::{PerformanceOf, Repository, VendorOf, VendorRepository as _},
};

/// Path parameter for vendor-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct Id<T> {
    /// The unique identifier of the vendor
    vendor_id: T,
}

/// The fields a client may set on a vendor.
///
/// Any other field, in particular any of the performance metrics, is rejected.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
struct VendorBody {
    /// The display name of the vendor
    name: String,
    /// A free-text postal address
    address: String,
    /// Free-text contact details
    contact_details: String,
}

impl From<VendorBody> for VendorData {
    fn from(body: VendorBody) -> Self {
        Self {
            name: body.name,
            address: body.address,
            contact_details: body.contact_details,
        }
    }
}

type VendorId<T> = <<T as vms_core::ports::Application>::Repository as Repository>::VendorId;

/// Creates a router with vendor-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get_with(list_vendors::<T>, list_vendors_docs)
                .post_with(create_vendor::<T>, create_vendor_docs),
            |route| route.tag("vendor"),
        )
        .api_route_with(
            "/{vendor_id}",
            get(read_vendor::<T>)
                .put_with(update_vendor::<T>, update_vendor_docs)
                .delete(delete_vendor::<T>),
            |route| route.tag("vendor"),
        )
        .api_route_with(
            "/{vendor_id}/performance",
            get(read_vendor_performance::<T>),
            |route| route.tag("vendor").tag("performance"),
        )
        .api_route_with(
            "/{vendor_id}/history",
            get_with(read_vendor_history::<T>, read_vendor_history_docs),
            |route| route.tag("vendor").tag("performance"),
        )
}

async fn list_vendors<T: ApiApplication>(
    State(app): State<T>,
) -> Result<Json<Vec<VendorOf<T::Repository>>>, (StatusCode, String)> {
    let vendors = app
        .database()
        .list_vendors()
        .await
        .map_err(storage_error("failed to list vendors"))?;
    Ok(Json(vendors))
}

fn list_vendors_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("List vendors")
        .description("List every vendor, oldest first, with its current metrics.")
        .response_with::<500, String, _>(|res| res.description("Database query failed"))
}

/// Create a new vendor.
///
/// The vendor starts with all metrics at zero.
///
/// # Returns
///
/// - `201 Created`: the new vendor
/// - `422 Unprocessable Entity`: the body is missing a field or sets a derived one
/// - `500 Internal Server Error`: Database operation failed
async fn create_vendor<T: ApiApplication>(
    State(app): State<T>,
    Json(body): Json<VendorBody>,
) -> Result<(StatusCode, Json<VendorOf<T::Repository>>), (StatusCode, String)> {
    let data = VendorData::from(body);
    let vendor_id = app.generate_vendor_id(&data);

    let vendor = app
        .database()
        .create_vendor(vendor_id.clone(), data, app.now())
        .await
        .map_err(storage_error("failed to create vendor"))?;

    event!(Level::INFO, %vendor_id, "vendor created");
    Ok((StatusCode::CREATED, Json(vendor)))
}

fn create_vendor_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Create vendor")
        .description(
            r#"
            Create a vendor from its name, address and contact details.
            Performance metrics cannot be supplied; they start at zero and are
            maintained from the vendor's purchase orders.
            "#,
        )
        .response_with::<422, String, _>(|res| res.description("Malformed vendor data"))
        .response_with::<500, String, _>(|res| res.description("Database operation failed"))
}

/// Retrieve a vendor.
///
/// # Returns
///
/// - `200 OK`: the vendor, including its current metrics
/// - `404 Not Found`: Vendor does not exist
/// - `500 Internal Server Error`: Database query failed
async fn read_vendor<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { vendor_id }): Path<Id<VendorId<T>>>,
) -> Result<Json<VendorOf<T::Repository>>, (StatusCode, String)> {
    let vendor = app
        .database()
        .get_vendor(vendor_id.clone())
        .await
        .map_err(storage_error(format!("failed to get vendor {}", vendor_id)))?
        .ok_or((StatusCode::NOT_FOUND, format!("unknown vendor {}", vendor_id)))?;
    Ok(Json(vendor))
}

/// Replace a vendor's identity fields.
///
/// # Returns
///
/// - `200 OK`: the updated vendor
/// - `404 Not Found`: Vendor does not exist
/// - `422 Unprocessable Entity`: the body is missing a field or sets a derived one
/// - `500 Internal Server Error`: Database operation failed
async fn update_vendor<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { vendor_id }): Path<Id<VendorId<T>>>,
    Json(body): Json<VendorBody>,
) -> Result<Json<VendorOf<T::Repository>>, (StatusCode, String)> {
    let vendor = app
        .database()
        .update_vendor(vendor_id.clone(), body.into(), app.now())
        .await
        .map_err(storage_error(format!("failed to update vendor {}", vendor_id)))?
        .ok_or((StatusCode::NOT_FOUND, format!("unknown vendor {}", vendor_id)))?;
    Ok(Json(vendor))
}

fn update_vendor_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Update vendor")
        .description("Replace the name, address and contact details of a vendor. The metrics are left untouched.")
        .response_with::<404, String, _>(|res| res.description("Vendor does not exist"))
        .response_with::<422, String, _>(|res| res.description("Malformed vendor data"))
        .response_with::<500, String, _>(|res| res.description("Database operation failed"))
}

/// Delete a vendor along with its purchase orders and performance history.
///
/// # Returns
///
/// - `200 OK`: the vendor as it was before deletion
/// - `404 Not Found`: Vendor does not exist
/// - `500 Internal Server Error`: Database operation failed
async fn delete_vendor<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { vendor_id }): Path<Id<VendorId<T>>>,
) -> Result<Json<VendorOf<T::Repository>>, (StatusCode, String)> {
    let vendor = app
        .database()
        .delete_vendor(vendor_id.clone())
        .await
        .map_err(storage_error(format!("failed to delete vendor {}", vendor_id)))?
        .ok_or((StatusCode::NOT_FOUND, format!("unknown vendor {}", vendor_id)))?;

    event!(Level::INFO, %vendor_id, "vendor deleted");
    Ok(Json(vendor))
}

/// Retrieve the current performance metrics of a vendor.
///
/// # Returns
///
/// - `200 OK`: the vendor id and its four metrics
/// - `404 Not Found`: Vendor does not exist
/// - `500 Internal Server Error`: Database query failed
async fn read_vendor_performance<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { vendor_id }): Path<Id<VendorId<T>>>,
) -> Result<Json<VendorPerformance<VendorId<T>>>, (StatusCode, String)> {
    let vendor = app
        .database()
        .get_vendor(vendor_id.clone())
        .await
        .map_err(storage_error(format!("failed to get vendor {}", vendor_id)))?
        .ok_or((StatusCode::NOT_FOUND, format!("unknown vendor {}", vendor_id)))?;
    Ok(Json(vendor.into()))
}

/// List the performance snapshots of a vendor, newest first.
///
/// # Returns
///
/// - `200 OK`: the snapshots
/// - `404 Not Found`: Vendor does not exist
/// - `500 Internal Server Error`: Database query failed
async fn read_vendor_history<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { vendor_id }): Path<Id<VendorId<T>>>,
) -> Result<Json<Vec<PerformanceOf<T::Repository>>>, (StatusCode, String)> {
    let history = app
        .database()
        .get_vendor_history(vendor_id.clone())
        .await
        .map_err(storage_error(format!(
            "failed to get history of vendor {}",
            vendor_id
        )))?
        .ok_or((StatusCode::NOT_FOUND, format!("unknown vendor {}", vendor_id)))?;
    Ok(Json(history))
}

fn read_vendor_history_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Vendor performance history")
        .description(
            r#"
            List the snapshots of a vendor's metrics, newest first. A snapshot
            is taken every time one of the vendor's orders is completed or rated.
            "#,
        )
        .response_with::<404, String, _>(|res| res.description("Vendor does not exist"))
        .response_with::<500, String, _>(|res| res.description("Database query failed"))
}
