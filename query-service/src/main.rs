use anyhow::{Context, Result};
use device_data::DeviceDataTable;
use query_service::{
    api::{self, AppState},
    config::AppConfig,
    loader, metrics_server, observability,
};
use std::{net::SocketAddr, path::Path, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    // Load configuration
    let cfg = AppConfig::load()?;

    // Start metrics server if configured
    if let Some(metrics_cfg) = &cfg.metrics {
        metrics_server::init(&metrics_cfg.bind_addr);
    }

    // Load the dataset before binding the listener; a missing or malformed
    // data file must keep the service from starting at all.
    let records = loader::load_from_path(Path::new(&cfg.data.file), cfg.profile)
        .with_context(|| format!("failed to load data file '{}'", cfg.data.file))?;
    let table = DeviceDataTable::new(records).context("failed to build device data table")?;

    let meta = table.metadata();
    tracing::info!(
        start = %cfg.profile.render_ts(meta.start),
        end = %cfg.profile.render_ts(meta.end),
        total_records = meta.total_records,
        "device data loaded"
    );

    let state = AppState {
        table: Arc::new(table),
        profile: cfg.profile,
    };
    let app = api::router(state);

    let addr: SocketAddr = cfg
        .http
        .bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid http.bind_addr: {e}"))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "query service listening");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
