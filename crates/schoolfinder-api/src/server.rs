//! Listener setup and graceful shutdown

use schoolfinder_core::errors::{ExError, ExErrorKind};
use tokio::net::TcpListener;

use crate::routes::{router, AppState};
use crate::settings::ServerSettings;

/// Bind and serve until Ctrl-C or SIGTERM
///
/// # Errors
///
/// Returns an `Io` error if the address can't be bound or the server fails.
pub async fn run(settings: &ServerSettings, state: AppState) -> Result<(), ExError> {
    let addr = settings.bind_addr();
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op("bind")
            .with_entity_id(addr.clone())
            .with_message(e.to_string())
    })?;

    tracing::info!(addr = %addr, "schoolfinder listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("serve")
                .with_message(e.to_string())
        })?;

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
