use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use event_publisher::{http, HttpNotifier, Registry, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("event_publisher=info".parse()?),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let notifier = HttpNotifier::new(config.registry.delivery_timeout)?;
    let registry = Registry::spawn(notifier, config.registry.clone());

    info!(addr = %config.bind_addr(), "starting server");
    let served = http::serve(registry.handle(), &config, shutdown_signal()).await;
    if let Err(err) = &served {
        error!(%err, "server failed");
    }

    // The server is down, so nothing else can reach the mailbox.
    let stats = registry.stop().await;
    info!(?stats, "publisher stopped");

    served?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
