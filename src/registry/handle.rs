use bytes::Bytes;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::warn;

use super::actor::{RegistryActor, RegistryStats};
use super::operation::{Operation, PublishReceipt};
use crate::config::RegistryConfig;
use crate::error::PublisherError;
use crate::listener::Listener;
use crate::notifier::Notifier;

/// Cloneable producer side of the registry mailbox.
///
/// Every method enqueues one operation and waits for its completion signal,
/// so each call is synchronous end to end. When the mailbox is full the call
/// waits for space.
#[derive(Clone, Debug)]
pub struct RegistryHandle {
    tx: mpsc::Sender<Operation>,
}

impl RegistryHandle {
    /// Insert or overwrite a listener. The caller validates fields first.
    pub async fn register(&self, listener: Listener) -> Result<(), PublisherError> {
        let (done, wait) = oneshot::channel();
        self.submit(Operation::Add { listener, done }).await?;
        wait.await.map_err(|_| PublisherError::Shutdown)
    }

    /// Remove every listener called `name`, whatever event it is under.
    pub async fn discard(&self, name: impl Into<String>) -> Result<(), PublisherError> {
        let (done, wait) = oneshot::channel();
        self.submit(Operation::Discard {
            name: name.into(),
            done,
        })
        .await?;
        wait.await.map_err(|_| PublisherError::Shutdown)
    }

    /// Deliver `body` to every listener of `event` and wait for all attempts.
    ///
    /// Fails with [`PublisherError::EventNotRegistered`] when no listener was
    /// ever registered under `event`. Individual delivery failures are not
    /// reported.
    pub async fn publish(
        &self,
        event: impl Into<String>,
        body: impl Into<Bytes>,
    ) -> Result<PublishReceipt, PublisherError> {
        let (done, wait) = oneshot::channel();
        self.submit(Operation::Publish {
            event: event.into(),
            body: body.into(),
            done,
        })
        .await?;
        wait.await.map_err(|_| PublisherError::Shutdown)?
    }

    /// Current `(name, address)` pairs under `event`, or `None` if the event
    /// was never registered.
    pub async fn listeners(
        &self,
        event: impl Into<String>,
    ) -> Result<Option<Vec<(String, String)>>, PublisherError> {
        let (done, wait) = oneshot::channel();
        self.submit(Operation::Listeners {
            event: event.into(),
            done,
        })
        .await?;
        wait.await.map_err(|_| PublisherError::Shutdown)
    }

    /// Ask the actor to stop without waiting for it.
    ///
    /// Must be the last operation submitted; anything queued after it fails
    /// with [`PublisherError::Shutdown`].
    pub async fn request_stop(&self) {
        if self.tx.send(Operation::Stop).await.is_err() {
            warn!("stop requested but registry already offline");
        }
    }

    /// Free mailbox slots; zero means the next submission waits.
    pub fn available_slots(&self) -> usize {
        self.tx.capacity()
    }

    /// `true` once the actor has exited.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    async fn submit(&self, op: Operation) -> Result<(), PublisherError> {
        self.tx
            .send(op)
            .await
            .map_err(|_| PublisherError::Shutdown)
    }
}

/// A running registry actor and its mailbox.
///
/// ## Example
///
/// ```ignore
/// use event_publisher::{Listener, Registry, RegistryConfig};
/// use event_publisher::notifier::HttpNotifier;
///
/// let config = RegistryConfig::default();
/// let registry = Registry::spawn(HttpNotifier::new(config.delivery_timeout)?, config);
/// let handle = registry.handle();
///
/// handle.register(Listener::new("orders", "billing", "http://billing/hook")).await?;
/// handle.publish("orders", r#"{"id":1}"#).await?;
///
/// let stats = registry.stop().await;
/// println!("delivered {} messages", stats.delivered);
/// ```
pub struct Registry {
    handle: RegistryHandle,
    join: Option<JoinHandle<RegistryStats>>,
}

impl Registry {
    /// Spawn the actor on the current tokio runtime.
    pub fn spawn<N>(notifier: N, config: RegistryConfig) -> Self
    where
        N: Notifier + 'static,
    {
        let (tx, rx) = mpsc::channel(config.mailbox_capacity.max(1));
        let actor = RegistryActor::new(notifier, config.fan_out, rx);
        let join = tokio::spawn(actor.run());

        Self {
            handle: RegistryHandle { tx },
            join: Some(join),
        }
    }

    /// A new producer handle for the mailbox.
    pub fn handle(&self) -> RegistryHandle {
        self.handle.clone()
    }

    /// Signal the actor to stop and wait for it to finish.
    /// Returns the lifetime statistics.
    pub async fn stop(mut self) -> RegistryStats {
        self.handle.request_stop().await;
        match self.join.take() {
            Some(join) => join.await.unwrap_or_default(),
            None => RegistryStats::default(),
        }
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        if self.join.is_some() && self.handle.tx.try_send(Operation::Stop).is_err() {
            warn!("registry dropped but stop signal could not be queued");
        }
    }
}
