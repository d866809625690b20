//! Notification client - one outbound delivery attempt per listener.
//!
//! A [`Notifier`] takes an address and a message body and reports what
//! happened. It never retries and never fails the broadcast: outcomes are
//! observed by the registry and logged.
//!
//! ## Implementations
//!
//! - [`HttpNotifier`] - `POST` with `Content-Type: application/json` over
//!   `reqwest`, bounded by a per-request timeout (3 s by default)
//! - [`RecordingNotifier`] - captures every send in memory, for tests and
//!   embedding

mod http;
mod recording;

use async_trait::async_trait;
use bytes::Bytes;

pub use http::{HttpNotifier, DEFAULT_DELIVERY_TIMEOUT};
pub use recording::{Delivery, RecordingNotifier};

/// Result of a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Listener answered with 200.
    Delivered,
    /// Request completed but the listener answered with another status.
    RespondedWithError(u16),
    /// Connection refused, timeout, DNS failure and the like.
    TransportFailure(String),
}

impl Outcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Outcome::Delivered)
    }
}

/// Delivers one message body to one listener address.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, address: &str, body: Bytes) -> Outcome;
}
