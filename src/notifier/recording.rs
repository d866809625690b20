use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use bytes::Bytes;

use super::{Notifier, Outcome};

/// A captured delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub address: String,
    pub body: Bytes,
}

/// In-memory notifier that records every send instead of touching the network.
///
/// Clones share the same log, so one copy can be handed to the registry while
/// the test keeps another to inspect what was sent.
///
/// ## Example
///
/// ```
/// use event_publisher::notifier::{Notifier, Outcome, RecordingNotifier};
///
/// # tokio_test_block_on(async {
/// let notifier = RecordingNotifier::new();
/// let outcome = notifier.send("http://a", "x".into()).await;
///
/// assert_eq!(outcome, Outcome::Delivered);
/// assert_eq!(notifier.addresses(), vec!["http://a".to_string()]);
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone)]
pub struct RecordingNotifier {
    log: Arc<Mutex<Vec<Delivery>>>,
    outcome: Outcome,
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingNotifier {
    /// Notifier that reports every send as delivered.
    pub fn new() -> Self {
        Self::with_outcome(Outcome::Delivered)
    }

    /// Notifier that reports `outcome` for every send.
    pub fn with_outcome(outcome: Outcome) -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            outcome,
        }
    }

    /// All recorded deliveries, in send order.
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded target addresses, in send order.
    pub fn addresses(&self) -> Vec<String> {
        self.deliveries().into_iter().map(|d| d.address).collect()
    }

    pub fn len(&self) -> usize {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, address: &str, body: Bytes) -> Outcome {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Delivery {
                address: address.to_string(),
                body,
            });
        self.outcome.clone()
    }
}
