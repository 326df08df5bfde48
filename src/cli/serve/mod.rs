//! Serve command - runs the HTTP API and keeps the cache in step with the
//! dataset file

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::api::create_router;
use crate::config::{ApiMode, AppConfig};
use crate::infrastructure::services::SourcePoller;
use crate::Components;

/// Run the API server
pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let components = crate::create_components(&config).await?;
    let poller = start_processing(&config, &components).await;
    let app = create_router(components.state);

    let addr = build_socket_addr(&config)?;
    info!(mode = ?config.api.mode, "Starting API server on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = poller {
        handle.abort();
    }

    info!("API server shutdown complete");

    Ok(())
}

/// Runs the initial processing pass and starts the poller in cached mode
///
/// A missing or unreadable dataset only logs: the API answers 503 until a
/// later poll succeeds.
async fn start_processing(config: &AppConfig, components: &Components) -> Option<JoinHandle<()>> {
    if config.api.mode == ApiMode::Live {
        info!("Live mode: results are computed per request, background processing disabled");
        return None;
    }

    let interval = config.data.poll_interval();
    let mut poller = SourcePoller::new(
        components.source.clone(),
        components.processing.clone(),
        interval.unwrap_or_default(),
    );

    let initial = if config.data.process_on_startup {
        poller.poll_once().await.map(|_| ())
    } else {
        poller.mark_current().await
    };

    if let Err(e) = initial {
        warn!(
            error = %e,
            path = %config.data.csv_path.display(),
            "Initial dataset processing skipped"
        );
    }

    interval.map(|_| poller.spawn())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_socket_addr() {
        let addr = build_socket_addr(&AppConfig::default()).unwrap();

        assert_eq!(addr.to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_host_is_error() {
        let mut config = AppConfig::default();
        config.server.host = "not-an-ip".to_string();

        assert!(build_socket_addr(&config).is_err());
    }
}
