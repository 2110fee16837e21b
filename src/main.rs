use tokio::signal;
use tokio::sync::watch;
use tracing::Instrument;
use tracing_subscriber::EnvFilter;

use formrelay::config::Config;
use formrelay::relay;
use formrelay::store::RecordStore;
use formrelay::worker;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.log_level)
        }))
        .with_thread_names(true)
        .init();

    tracing::info!("Starting formrelay");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Relay receiver
    let socket = relay::bind(config.relay_addr).await?;
    let store = RecordStore::new(&config.storage_dir);
    let relay_worker = worker::spawn(socket, store, shutdown_rx);

    // HTTP front end
    let addr = config.http_addr();
    let app = formrelay::build_app(config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let http_span = tracing::info_span!("http");
    http_span.in_scope(|| tracing::info!("Starting HTTP server on {addr}"));

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .into_future()
        .instrument(http_span.clone())
        .await;
    http_span.in_scope(|| tracing::info!("HTTP server stopped"));

    let _ = shutdown_tx.send(true);
    relay_worker.await?;

    served?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping listeners");
}
