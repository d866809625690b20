//! HTTP surface for the registry.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /listener` - register `{event, name, address}`. 201 / 400.
//! - `DELETE /listener/*name` - discard a listener from every event. 200 / 400.
//! - `POST /publish/*event` - broadcast the raw body. 200 / 400 / 404.
//!
//! Names and events are everything after the prefix, slashes included.
//!
//! Any other method on these paths answers 405.
//!
//! ## Example
//!
//! ```ignore
//! use event_publisher::{http, Registry, RegistryConfig, ServerConfig};
//!
//! let config = ServerConfig::from_env()?;
//! let registry = Registry::spawn(notifier, config.registry.clone());
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(registry.handle(), config.request_timeout);
//!
//! // Or serve directly until ctrl-c
//! http::serve(registry.handle(), &config, shutdown_signal()).await?;
//! ```

mod handlers;

use std::future::Future;
use std::time::Duration;

use axum::routing::{delete, post};
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::registry::RegistryHandle;

/// Build an axum `Router` that submits requests to the given registry.
pub fn router(registry: RegistryHandle, request_timeout: Duration) -> Router {
    Router::new()
        .route(
            "/listener",
            post(handlers::register).fallback(handlers::post_only),
        )
        .route(
            "/listener/",
            delete(handlers::missing_listener_name).fallback(handlers::delete_only),
        )
        .route(
            "/listener/*name",
            delete(handlers::unregister).fallback(handlers::delete_only),
        )
        .route(
            "/publish/",
            post(handlers::missing_event_name).fallback(handlers::post_only),
        )
        .route(
            "/publish/*event",
            post(handlers::publish).fallback(handlers::post_only),
        )
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(registry)
}

/// Serve the registry over HTTP at `config.bind_addr()` until `shutdown`
/// resolves.
pub async fn serve<F>(
    registry: RegistryHandle,
    config: &ServerConfig,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(registry, config.request_timeout);
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, "server listening");
    info!("POST /listener registers a new listener");
    info!("DELETE /listener/*name unregisters a listener");
    info!("POST /publish/*event publishes a message to registered listeners");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
