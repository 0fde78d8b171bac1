mod api;
mod binders;
mod config;
mod db;
mod error;
mod state;
mod types;

#[cfg(test)]
mod test_support;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::routes::{router, ApiState};
use crate::config::{Config, DEFAULT_SUMMARY_X, DEFAULT_SUMMARY_Y};
use crate::error::Result;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    // --- Load both tables once; they stay immutable for the life of the process ---
    let pool = db::loader::connect(&cfg.db_path).await?;
    let store = db::loader::load(&pool).await?;
    pool.close().await;
    info!(
        "Data ready from {}: {} players, {} history rows",
        cfg.db_path,
        store.summary().len(),
        store.history().len(),
    );

    info!(
        "Summary metrics: {}",
        store.summary_numeric_columns().join(", ")
    );
    info!(
        "History metrics: {}",
        store.history_numeric_columns().join(", ")
    );
    for default in [DEFAULT_SUMMARY_X, DEFAULT_SUMMARY_Y] {
        if !store.summary_numeric_columns().iter().any(|c| c == default) {
            warn!("Default summary metric {default} is not a numeric column; the default chart will fail to render");
        }
    }

    // --- HTTP API ---
    let app = router(ApiState::new(store));
    let bind_addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("HTTP API listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
