use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::error::PublisherError;
use crate::listener::Listener;
use crate::registry::RegistryHandle;

const REGISTERED: &str = "Registered";
const REMOVED: &str = "Removed";
const PUBLISHED: &str = "Published";

const INVALID_BODY: &str = "Body contains invalid values";
const UNREADABLE_BODY: &str = "Cannot read body";
const NAME_REQUIRED: &str = "Listener name must be specified";
const EVENT_REQUIRED: &str = "Event name must be specified";

/// `POST /listener` - decode, validate, register.
pub(super) async fn register(
    State(registry): State<RegistryHandle>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(err) => {
            warn!(%err, "unreadable listener body");
            return (StatusCode::BAD_REQUEST, INVALID_BODY).into_response();
        }
    };

    let listener: Listener = match serde_json::from_slice(&body) {
        Ok(listener) => listener,
        Err(err) => {
            warn!(%err, "invalid listener body");
            return (StatusCode::BAD_REQUEST, INVALID_BODY).into_response();
        }
    };

    if let Err(err) = listener.validate() {
        warn!(%err, ?listener, "listener should contain non-empty fields");
        return (StatusCode::BAD_REQUEST, INVALID_BODY).into_response();
    }

    match registry.register(listener).await {
        Ok(()) => (StatusCode::CREATED, REGISTERED).into_response(),
        Err(err) => error_response(err),
    }
}

/// `DELETE /listener/*name` - discard by name across all events.
pub(super) async fn unregister(
    State(registry): State<RegistryHandle>,
    Path(name): Path<String>,
) -> Response {
    if name.is_empty() {
        return missing_listener_name().await;
    }
    match registry.discard(name).await {
        Ok(()) => (StatusCode::OK, REMOVED).into_response(),
        Err(err) => error_response(err),
    }
}

/// `POST /publish/*event` - forward the raw body to every listener.
pub(super) async fn publish(
    State(registry): State<RegistryHandle>,
    Path(event): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    if event.is_empty() {
        return missing_event_name().await;
    }
    let body = match body {
        Ok(body) => body,
        Err(err) => {
            warn!(%err, event = %event, "unreadable publish body");
            return (StatusCode::BAD_REQUEST, UNREADABLE_BODY).into_response();
        }
    };

    match registry.publish(event, body).await {
        Ok(_) => (StatusCode::OK, PUBLISHED).into_response(),
        Err(err) => error_response(err),
    }
}

pub(super) async fn missing_listener_name() -> Response {
    warn!("listener name is empty");
    (StatusCode::BAD_REQUEST, NAME_REQUIRED).into_response()
}

pub(super) async fn missing_event_name() -> Response {
    warn!("event name is empty");
    (StatusCode::BAD_REQUEST, EVENT_REQUIRED).into_response()
}

pub(super) async fn post_only(method: Method) -> Response {
    warn!(%method, "method not available, POST only");
    (StatusCode::METHOD_NOT_ALLOWED, "POST method only").into_response()
}

pub(super) async fn delete_only(method: Method) -> Response {
    warn!(%method, "method not available, DELETE only");
    (StatusCode::METHOD_NOT_ALLOWED, "DELETE method only").into_response()
}

fn error_response(err: PublisherError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    warn!(%err, "registry rejected request");
    let message = match &err {
        PublisherError::EventNotRegistered(_) => "Event wasn't registered".to_string(),
        PublisherError::Shutdown => err.to_string(),
    };
    (status, message).into_response()
}
