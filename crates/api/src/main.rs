use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tasktimer_api::background::timer_ticker;
use tasktimer_api::config::{LogFormat, ServerConfig};
use tasktimer_api::router::build_app_router;
use tasktimer_api::state::AppState;
use tasktimer_events::NotificationLogger;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "tasktimer_api=debug,tasktimer_db=debug,tasktimer_events=info,tower_http=debug".into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!(
        host = %config.host,
        port = %config.port,
        timer_work_minutes = config.timer_work_minutes,
        "Loaded server configuration"
    );

    // --- App state ---
    let state = AppState::new(config.clone());

    // --- Notification delivery ---
    let notifier_handle = tokio::spawn(NotificationLogger::run(state.event_bus.subscribe()));

    // --- Timer ticker ---
    let ticker_cancel = CancellationToken::new();
    let ticker_handle = tokio::spawn(timer_ticker::run(
        Arc::clone(&state.timer),
        Arc::clone(&state.event_bus),
        ticker_cancel.clone(),
    ));

    tracing::info!("Background services started (timer ticker, notification logger)");

    // --- Router ---
    let app = build_app_router(state.clone(), &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");
    let grace = Duration::from_secs(config.shutdown_timeout_secs);

    ticker_cancel.cancel();
    let _ = tokio::time::timeout(grace, ticker_handle).await;
    tracing::info!("Timer ticker stopped");

    // Dropping the last bus handle closes the channel and ends the logger.
    drop(state);
    match tokio::time::timeout(grace, notifier_handle).await {
        Ok(Ok(delivered)) => tracing::info!(delivered, "Notification logger stopped"),
        Ok(Err(e)) => tracing::error!(error = %e, "Notification logger panicked"),
        Err(_) => tracing::warn!("Notification logger did not stop in time"),
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
