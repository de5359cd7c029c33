use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{
    net::TcpListener,
    signal::unix::{SignalKind, signal},
    sync::oneshot,
};

use crate::{
    api::{AppState, build_router},
    config::ServerConfig,
    models::BudgetModels,
};

pub async fn run(config: ServerConfig, models: Arc<BudgetModels>) -> Result<()> {
    let bind_address = config.bind_address()?;
    let listener = TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("unable to bind {bind_address}"))?;

    let mut sigint =
        signal(SignalKind::interrupt()).context("unable to listen for SIGINT (Ctrl+C)")?;
    let mut sigterm = signal(SignalKind::terminate()).context("unable to listen for SIGTERM")?;

    let router = build_router(AppState::new(models), &config.router_options());

    eprintln!("Budget allocation server listening on http://{bind_address}");
    tracing::info!(
        target: "server",
        address = %bind_address,
        static_dir = ?config.static_dir,
        "server_started"
    );

    let (signal_tx, signal_rx) = oneshot::channel::<&'static str>();
    let shutdown = async move {
        let signal_name = tokio::select! {
            _ = sigint.recv() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
        };
        tracing::info!(target: "server", signal = signal_name, "server_stopping");
        let _ = signal_tx.send(signal_name);
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("server terminated unexpectedly")?;

    let signal_name = signal_rx.await.unwrap_or("shutdown");
    eprintln!("Budget allocation server stopped: received {signal_name}");
    Ok(())
}
