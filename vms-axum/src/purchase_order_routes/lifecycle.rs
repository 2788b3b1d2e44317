use super::{Id, PurchaseOrderId, rejection};
use crate::{ApiApplication, storage_error};

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{Level, event};
use vms_core::{
    models::QualityRating,
    ports::{PurchaseOrderOf, PurchaseOrderRepository as _},
};

/// Request body for rating an order.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct RatingBody {
    /// A rating from 0 to 5
    quality_rating: QualityRating,
}

/// Record the vendor's acknowledgment of an order.
///
/// The acknowledgment time is the time of the request. An order can be
/// acknowledged only once, whatever its status.
///
/// # Returns
///
/// - `200 OK`: the acknowledged order
/// - `404 Not Found`: Order does not exist
/// - `409 Conflict`: Order was already acknowledged
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn acknowledge_order<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { purchase_order_id }): Path<Id<PurchaseOrderId<T>>>,
) -> Result<Json<PurchaseOrderOf<T::Repository, T::Items>>, (StatusCode, String)> {
    let order = app
        .database()
        .acknowledge_order(purchase_order_id.clone(), app.now())
        .await
        .map_err(storage_error(format!(
            "failed to acknowledge purchase order {}",
            purchase_order_id
        )))?
        .map_err(|failure| rejection(&purchase_order_id, failure))?;

    event!(Level::INFO, %purchase_order_id, "purchase order acknowledged");
    Ok(Json(order))
}

/// Mark a pending order as completed.
///
/// The vendor's metrics are recalculated and a snapshot of them is appended
/// to the vendor's performance history. The delivery date is left as it was.
///
/// # Returns
///
/// - `200 OK`: the completed order
/// - `404 Not Found`: Order does not exist
/// - `409 Conflict`: Order is not pending
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn complete_order<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { purchase_order_id }): Path<Id<PurchaseOrderId<T>>>,
) -> Result<Json<PurchaseOrderOf<T::Repository, T::Items>>, (StatusCode, String)> {
    let order = app
        .database()
        .complete_order(purchase_order_id.clone(), app.now())
        .await
        .map_err(storage_error(format!(
            "failed to complete purchase order {}",
            purchase_order_id
        )))?
        .map_err(|failure| rejection(&purchase_order_id, failure))?;

    event!(Level::INFO, %purchase_order_id, "purchase order completed");
    Ok(Json(order))
}

/// Set the quality rating of a completed order.
///
/// Rating again replaces the previous value. Each rating appends a snapshot
/// of the vendor's metrics to its performance history.
///
/// # Returns
///
/// - `200 OK`: the rated order
/// - `404 Not Found`: Order does not exist
/// - `409 Conflict`: Order is not completed
/// - `422 Unprocessable Entity`: Rating is missing or outside 0 to 5
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn rate_order<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { purchase_order_id }): Path<Id<PurchaseOrderId<T>>>,
    Json(RatingBody { quality_rating }): Json<RatingBody>,
) -> Result<Json<PurchaseOrderOf<T::Repository, T::Items>>, (StatusCode, String)> {
    let order = app
        .database()
        .rate_order(purchase_order_id.clone(), quality_rating, app.now())
        .await
        .map_err(storage_error(format!(
            "failed to rate purchase order {}",
            purchase_order_id
        )))?
        .map_err(|failure| rejection(&purchase_order_id, failure))?;

    event!(
        Level::INFO,
        %purchase_order_id,
        quality_rating = quality_rating.value(),
        "purchase order rated"
    );
    Ok(Json(order))
}
