use std::fs::File;

use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};
use vms_axum::{openapi, start_server};
use vms_sqlite::Db;
use vmsd::{AppConfig, Cli, impls::VendorApp};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // By convention, we leverage `tracing` to instrument and log various
    // operations throughout this project.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;

    // If requested, dump the schema and exit.
    if let Some(path) = &cli.schema {
        let schema = openapi::<VendorApp>();
        serde_json::to_writer_pretty(File::create(path)?, &schema)?;
        tracing::info!("wrote the OpenAPI document to {}", path.display());
        return Ok(());
    }

    let AppConfig { server, database } = AppConfig::load(&cli)?;

    let db = Db::open(&database).await?;
    tracing::info!(path = ?database.database_path, "opened database");
    let app = VendorApp { db };

    start_server(server, app).await?;
    Ok(())
}
