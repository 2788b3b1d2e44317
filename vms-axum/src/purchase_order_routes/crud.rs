use super::{DateTime, Id, PurchaseOrderId, VendorId, rejection};
use crate::{ApiApplication, storage_error};

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::{Level, event};
use vms_core::{
    models::{PurchaseOrderData, PurchaseOrderUpdate},
    ports::{PurchaseOrderOf, PurchaseOrderRepository as _},
};

/// Query parameters for listing orders.
#[derive(serde::Deserialize, schemars::JsonSchema)]
pub(crate) struct OrderFilter<T> {
    /// Only list the orders placed with this vendor
    vendor_id: Option<T>,
}

pub(crate) async fn list_orders<T: ApiApplication>(
    State(app): State<T>,
    Query(OrderFilter { vendor_id }): Query<OrderFilter<VendorId<T>>>,
) -> Result<Json<Vec<PurchaseOrderOf<T::Repository, T::Items>>>, (StatusCode, String)> {
    let orders = app
        .database()
        .list_orders(vendor_id)
        .await
        .map_err(storage_error("failed to list purchase orders"))?;
    Ok(Json(orders))
}

/// Place a new purchase order.
///
/// # Returns
///
/// - `201 Created`: the new pending order
/// - `422 Unprocessable Entity`: malformed body, or the vendor does not exist
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn create_order<T: ApiApplication>(
    State(app): State<T>,
    Json(data): Json<PurchaseOrderData<DateTime<T>, VendorId<T>, T::Items>>,
) -> Result<(StatusCode, Json<PurchaseOrderOf<T::Repository, T::Items>>), (StatusCode, String)> {
    let purchase_order_id = app.generate_purchase_order_id(&data);

    let order = app
        .database()
        .create_order(purchase_order_id.clone(), data, app.now())
        .await
        .map_err(storage_error("failed to create purchase order"))?
        .map_err(|failure| rejection(&purchase_order_id, failure))?;

    event!(Level::INFO, %purchase_order_id, vendor_id = %order.vendor_id, "purchase order placed");
    Ok((StatusCode::CREATED, Json(order)))
}

/// Retrieve a purchase order.
///
/// # Returns
///
/// - `200 OK`: the order
/// - `404 Not Found`: Order does not exist
/// - `500 Internal Server Error`: Database query failed
pub(crate) async fn read_order<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { purchase_order_id }): Path<Id<PurchaseOrderId<T>>>,
) -> Result<Json<PurchaseOrderOf<T::Repository, T::Items>>, (StatusCode, String)> {
    let order = app
        .database()
        .get_order(purchase_order_id.clone())
        .await
        .map_err(storage_error(format!(
            "failed to get purchase order {}",
            purchase_order_id
        )))?
        .ok_or((
            StatusCode::NOT_FOUND,
            format!("unknown purchase order {}", purchase_order_id),
        ))?;
    Ok(Json(order))
}

/// Edit an order directly.
///
/// Omitted fields keep their values and an explicit `null` delivery date
/// clears it. A pending order may be cancelled here; any other status change
/// is rejected.
///
/// # Returns
///
/// - `200 OK`: the updated order
/// - `404 Not Found`: Order does not exist
/// - `409 Conflict`: Status change is not allowed
/// - `422 Unprocessable Entity`: Malformed update or non-editable field
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn update_order<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { purchase_order_id }): Path<Id<PurchaseOrderId<T>>>,
    Json(update): Json<PurchaseOrderUpdate<DateTime<T>, T::Items>>,
) -> Result<Json<PurchaseOrderOf<T::Repository, T::Items>>, (StatusCode, String)> {
    let order = app
        .database()
        .update_order(purchase_order_id.clone(), update, app.now())
        .await
        .map_err(storage_error(format!(
            "failed to update purchase order {}",
            purchase_order_id
        )))?
        .map_err(|failure| rejection(&purchase_order_id, failure))?;
    Ok(Json(order))
}

/// Delete a purchase order.
///
/// The vendor's metrics are recalculated without the order. If it was the
/// vendor's last order, the metrics keep their previous values.
///
/// # Returns
///
/// - `200 OK`: the order as it was before deletion
/// - `404 Not Found`: Order does not exist
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn delete_order<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { purchase_order_id }): Path<Id<PurchaseOrderId<T>>>,
) -> Result<Json<PurchaseOrderOf<T::Repository, T::Items>>, (StatusCode, String)> {
    let order = app
        .database()
        .delete_order(purchase_order_id.clone(), app.now())
        .await
        .map_err(storage_error(format!(
            "failed to delete purchase order {}",
            purchase_order_id
        )))?
        .map_err(|failure| rejection(&purchase_order_id, failure))?;

    event!(Level::INFO, %purchase_order_id, "purchase order deleted");
    Ok(Json(order))
}
