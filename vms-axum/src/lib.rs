#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the vms-core crate.
//! [vms_core]: https://docs.rs/vms_core/latest/vms_core/index.html
#![doc = include_str!("../README.md")]

mod purchase_order_routes;
mod vendor_routes;

use aide::{
    axum::{ApiRouter, routing::get},
    openapi::OpenApi,
};
use axum::{Extension, Json, http::StatusCode};
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use std::{fmt::Display, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{Level, event};
use vms_core::ports::{Application, Repository};

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

/// Response for the health check endpoint
#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

fn api_router<T: ApiApplication>() -> (axum::Router<T>, OpenApi) {
    let mut api = OpenApi::default();
    let router = ApiRouter::<T>::new()
        .api_route("/health", get(health_check))
        .nest("/vendors", vendor_routes::router::<T>())
        .nest("/purchase_orders", purchase_order_routes::router::<T>())
        .nest_api_service("/docs", docs_routes())
        .finish_api_with(&mut api, api_docs);
    (router, api)
}

/// Construct a full API router with the given state and config
pub fn router<T: ApiApplication>(state: T, config: AxumConfig) -> axum::Router {
    let (router, api) = api_router::<T>();
    router
        .layer(Extension(Arc::new(api))) // Arc is very important here or you will face massive memory and performance issues
        .layer(Extension(Arc::new(config)))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The OpenAPI document describing the routes served for `T`
pub fn openapi<T: ApiApplication>() -> OpenApi {
    api_router::<T>().1
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!("Listening for requests on {}", listener.local_addr()?);

    let service = router(app, config);
    axum::serve(listener, service).await
}

/// Log a storage failure and turn it into a 500 response.
pub(crate) fn storage_error<E: Display>(
    message: impl Into<String>,
) -> impl FnOnce(E) -> (StatusCode, String) {
    let message = message.into();
    move |err| {
        event!(Level::ERROR, err = err.to_string());
        (StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

/// Axum imposes all sorts of constraints on what can pass for state. This
/// trait, coupled with a blanket implementation, specifies it all upfront and
/// in one place. If a function takes a generic `T: ApiApplication`, then
/// everything one might reasonably want to do should work.
pub trait ApiApplication:
    Clone
    + Send
    + Sync
    + 'static
    + Application<
        Items: Send + Sync + Serialize + DeserializeOwned + JsonSchema + 'static,
        Repository: Clone
                        + Send
                        + Sync
                        + 'static
                        + Repository<
            DateTime: Clone + Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync,
            VendorId: Clone + Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync,
            PurchaseOrderId: Clone
                                 + Display
                                 + Serialize
                                 + DeserializeOwned
                                 + JsonSchema
                                 + Send
                                 + Sync,
            PerformanceId: Clone + Serialize + JsonSchema + Send + Sync,
        >,
    >
{
}

// this is the blanket implementation
impl<T: Clone + Send + Sync + 'static> ApiApplication for T where
    T: Application<
            Items: Send + Sync + Serialize + DeserializeOwned + JsonSchema + 'static,
            Repository: Clone
                            + Send
                            + Sync
                            + 'static
                            + Repository<
                DateTime: Clone + Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync,
                VendorId: Clone + Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync,
                PurchaseOrderId: Clone
                                     + Display
                                     + Serialize
                                     + DeserializeOwned
                                     + JsonSchema
                                     + Send
                                     + Sync,
                PerformanceId: Clone + Serialize + JsonSchema + Send + Sync,
            >,
        >
{
}
