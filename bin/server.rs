// Expense Tracker - Web Server
// REST API over an in-memory expense store (state is lost on shutdown)

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use expense_tracker::{logging, router, ExpenseService, ServerConfig, VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    logging::init_tracing(&config.log_filter);

    info!(version = VERSION, "expense tracker starting");

    let service = Arc::new(ExpenseService::new());
    let app = router(service);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    info!(%addr, "server running, API at http://{}/api/expenses", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
