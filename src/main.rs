use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use trailfit::adapters::http;
use trailfit::bootstrap::{Application, BrokerHandles, StartupError};
use trailfit::config::AppConfig;

/// Upper bound on waiting for consumers to drain after the listener closes.
const CONSUMER_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let broker = BrokerHandles::connect(&config.broker).await?;
    tracing::info!(backend = ?config.broker.backend, suffix = %config.broker.topic_suffix, "broker ready");

    let mut app = Application::build(&config, broker)?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let consumers = app.start_consumers(shutdown_rx).await?;

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "listening");

    let router = http::router(app.state.clone(), config.server.request_timeout());
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
            tracing::info!("shutdown requested");
        })
        .await?;

    // Receivers may already be gone if every consumer exited on its own.
    let _ = shutdown_tx.send(true);
    for handle in consumers {
        match tokio::time::timeout(CONSUMER_DRAIN_TIMEOUT, handle).await {
            Ok(Ok(stats)) => tracing::info!(handled = stats.handled, failed = stats.failed, "consumer stopped"),
            Ok(Err(e)) => tracing::error!(error = %e, "consumer task panicked"),
            Err(_) => tracing::warn!("consumer did not stop in time"),
        }
    }

    let activity = app.activity.snapshot();
    tracing::info!(
        started = activity.started,
        ended = activity.ended,
        total_distance_m = activity.total_distance_m,
        "stopped"
    );
    Ok(())
}

/// `RUST_LOG` wins over the configured level. Production logs are JSON.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}
