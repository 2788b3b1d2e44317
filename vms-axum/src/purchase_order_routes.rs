//! REST API endpoints for purchase orders.
//!
//! Besides plain CRUD, orders move through a small lifecycle: a vendor
//! acknowledges an order, the order is completed, and a completed order is
//! given a quality rating. Every successful change recalculates the vendor's
//! metrics.

use crate::ApiApplication;
use aide::{
    axum::{
        ApiRouter,
        routing::{get, get_with, patch_with, post, post_with},
    },
    transform::TransformOperation,
};
use axum::http::StatusCode;
use tracing::{Level, event};
use vms_core::ports::{Application, OrderFailure, Repository};

mod crud;
use crud::*;

mod lifecycle;
use lifecycle::*;

/// Path parameter for order-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct Id<T> {
    /// The unique identifier of the purchase order
    purchase_order_id: T,
}

type VendorId<T> = <<T as Application>::Repository as Repository>::VendorId;
type PurchaseOrderId<T> = <<T as Application>::Repository as Repository>::PurchaseOrderId;
type DateTime<T> = <<T as Application>::Repository as Repository>::DateTime;

/// Creates a router with purchase-order endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get_with(list_orders::<T>, list_orders_docs)
                .post_with(create_order::<T>, create_order_docs),
            |route| route.tag("purchase_order"),
        )
        .api_route_with(
            "/{purchase_order_id}",
            get(read_order::<T>)
                .put_with(update_order::<T>, update_order_docs)
                .delete(delete_order::<T>),
            |route| route.tag("purchase_order"),
        )
        .api_route_with(
            "/{purchase_order_id}/acknowledge",
            post(acknowledge_order::<T>),
            |route| route.tag("purchase_order").tag("lifecycle"),
        )
        .api_route_with(
            "/{purchase_order_id}/complete",
            post_with(complete_order::<T>, complete_order_docs),
            |route| route.tag("purchase_order").tag("lifecycle"),
        )
        .api_route_with(
            "/{purchase_order_id}/quality_rating",
            patch_with(rate_order::<T>, rate_order_docs),
            |route| route.tag("purchase_order").tag("lifecycle"),
        )
}

/// Map a rejected operation onto its response.
fn rejection(
    purchase_order_id: impl std::fmt::Display,
    failure: OrderFailure,
) -> (StatusCode, String) {
    let status = match failure {
        OrderFailure::DoesNotExist => StatusCode::NOT_FOUND,
        OrderFailure::UnknownVendor => StatusCode::UNPROCESSABLE_ENTITY,
        OrderFailure::AlreadyAcknowledged
        | OrderFailure::NotPending(_)
        | OrderFailure::NotCompleted(_)
        | OrderFailure::IllegalStatusChange { .. } => StatusCode::CONFLICT,
    };
    event!(Level::DEBUG, %purchase_order_id, %failure, "rejected");
    (status, format!("purchase order {}: {}", purchase_order_id, failure))
}

fn list_orders_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("List purchase orders")
        .description("List purchase orders, oldest first. Pass `vendor_id` to restrict the list to one vendor.")
        .response_with::<500, String, _>(|res| res.description("Database query failed"))
}

fn create_order_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Place purchase order")
        .description(
            r#"
            Place a pending purchase order with a vendor. `order_date` and
            `issue_date` default to the current time. The vendor's metrics are
            recalculated to include the new order.
            "#,
        )
        .response_with::<422, String, _>(|res| {
            res.description("Malformed order data or unknown vendor")
        })
        .response_with::<500, String, _>(|res| res.description("Database operation failed"))
}

fn update_order_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Edit purchase order")
        .description(
            r#"
            Edit the dates, items or quantity of an order. Omitted fields are
            unchanged; a null delivery date clears it. The only status change
            accepted here is cancelling a pending order; acknowledgment,
            completion and rating have their own endpoints.
            "#,
        )
        .response_with::<404, String, _>(|res| res.description("Order does not exist"))
        .response_with::<409, String, _>(|res| res.description("Illegal status change"))
        .response_with::<422, String, _>(|res| res.description("Malformed order data"))
        .response_with::<500, String, _>(|res| res.description("Database operation failed"))
}

fn complete_order_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Complete purchase order")
        .description("Mark a pending order as completed and take a snapshot of the vendor's metrics.")
        .response_with::<404, String, _>(|res| res.description("Order does not exist"))
        .response_with::<409, String, _>(|res| res.description("Order is not pending"))
        .response_with::<500, String, _>(|res| res.description("Database operation failed"))
}

fn rate_order_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Rate purchase order")
        .description("Set the quality rating (0 to 5) of a completed order and take a snapshot of the vendor's metrics.")
        .response_with::<404, String, _>(|res| res.description("Order does not exist"))
        .response_with::<409, String, _>(|res| res.description("Order is not completed"))
        .response_with::<422, String, _>(|res| res.description("Rating outside the 0 to 5 scale"))
        .response_with::<500, String, _>(|res| res.description("Database operation failed"))
}
