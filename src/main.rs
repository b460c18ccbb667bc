use anyhow::Context;
use log::info;
use sales_dashboard::DashboardConfig;
use sales_dashboard::server::{AppState, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::default();
    let addr = config.bind_addr;

    // Surface a missing or malformed file at startup; requests still reload it
    let state = AppState::new(config);
    match state.table() {
        Ok(table) => info!(
            "Loaded {} rows from {}",
            table.num_rows(),
            state.config.data_path.display()
        ),
        Err(e) => log::warn!("{e}"),
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Dashboard available at http://{addr}");

    axum::serve(listener, router(state))
        .await
        .context("Server error")?;
    Ok(())
}
