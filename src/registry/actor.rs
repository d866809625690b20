//! The registry actor loop.
//!
//! Owns the [`ListenerDirectory`] outright and applies mailbox operations one
//! at a time, so no lock guards the directory.

use bytes::Bytes;
use futures::future::join_all;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::operation::{Operation, PublishReceipt};
use crate::config::FanOut;
use crate::directory::ListenerDirectory;
use crate::error::PublisherError;
use crate::listener::Listener;
use crate::notifier::{Notifier, Outcome};

/// Counters collected over the actor's lifetime, returned on stop.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegistryStats {
    /// Register operations applied (including overwrites).
    pub registered: usize,
    /// Discard operations applied (including no-ops).
    pub discarded: usize,
    /// Publishes broadcast to an existing event.
    pub published: usize,
    /// Publishes refused because the event was never registered.
    pub rejected: usize,
    /// Delivery attempts answered with 200.
    pub delivered: usize,
    /// Delivery attempts answered with any other status.
    pub responded_with_error: usize,
    /// Delivery attempts that never got a response.
    pub transport_failures: usize,
}

pub(crate) struct RegistryActor<N> {
    directory: ListenerDirectory,
    notifier: N,
    fan_out: FanOut,
    mailbox: mpsc::Receiver<Operation>,
    stats: RegistryStats,
}

impl<N: Notifier> RegistryActor<N> {
    pub(crate) fn new(notifier: N, fan_out: FanOut, mailbox: mpsc::Receiver<Operation>) -> Self {
        Self {
            directory: ListenerDirectory::new(),
            notifier,
            fan_out,
            mailbox,
            stats: RegistryStats::default(),
        }
    }

    /// Service the mailbox until a stop signal arrives or every handle is gone.
    pub(crate) async fn run(mut self) -> RegistryStats {
        info!("publisher service is online");

        while let Some(op) = self.mailbox.recv().await {
            debug!(op = op.kind(), "operation received");
            match op {
                Operation::Add { listener, done } => {
                    self.add(&listener);
                    let _ = done.send(());
                }
                Operation::Discard { name, done } => {
                    self.directory.remove_by_name(&name);
                    self.stats.discarded += 1;
                    info!(listener = %name, "discard executed");
                    let _ = done.send(());
                }
                Operation::Publish { event, body, done } => {
                    let result = self.broadcast(&event, body).await;
                    let _ = done.send(result);
                }
                Operation::Listeners { event, done } => {
                    let listeners = self
                        .directory
                        .exists(&event)
                        .then(|| self.directory.listeners_for(&event));
                    let _ = done.send(listeners);
                }
                Operation::Stop => break,
            }
        }

        info!(
            events = self.directory.event_count(),
            listeners = self.directory.listener_count(),
            "publisher service is offline"
        );
        self.stats
    }

    fn add(&mut self, listener: &Listener) {
        let existed = self.directory.exists(&listener.event);
        self.directory
            .upsert(&listener.event, &listener.name, &listener.address);
        self.stats.registered += 1;

        if existed {
            info!(
                event = %listener.event,
                listener = %listener.name,
                address = %listener.address,
                "registered listener into existing event"
            );
        } else {
            info!(
                event = %listener.event,
                listener = %listener.name,
                address = %listener.address,
                "created event and registered listener"
            );
        }
    }

    async fn broadcast(
        &mut self,
        event: &str,
        body: Bytes,
    ) -> Result<PublishReceipt, PublisherError> {
        if !self.directory.exists(event) {
            self.stats.rejected += 1;
            warn!(event, "publish to unregistered event");
            return Err(PublisherError::EventNotRegistered(event.to_string()));
        }

        let targets = self.directory.listeners_for(event);
        let outcomes = match self.fan_out {
            FanOut::Sequential => {
                let mut outcomes = Vec::with_capacity(targets.len());
                for (name, address) in &targets {
                    debug!(event, listener = %name, %address, "sending event to listener");
                    outcomes.push(self.notifier.send(address, body.clone()).await);
                }
                outcomes
            }
            FanOut::Concurrent => {
                join_all(
                    targets
                        .iter()
                        .map(|(_, address)| self.notifier.send(address, body.clone())),
                )
                .await
            }
        };

        for ((name, address), outcome) in targets.iter().zip(&outcomes) {
            self.observe(event, name, address, outcome);
        }

        self.stats.published += 1;
        info!(event, listeners = targets.len(), "broadcasted message");
        Ok(PublishReceipt {
            attempted: targets.len(),
        })
    }

    fn observe(&mut self, event: &str, name: &str, address: &str, outcome: &Outcome) {
        match outcome {
            Outcome::Delivered => {
                self.stats.delivered += 1;
                debug!(event, listener = name, address, "delivered");
            }
            Outcome::RespondedWithError(status) => {
                self.stats.responded_with_error += 1;
                warn!(
                    event,
                    listener = name,
                    address,
                    status,
                    "listener responded with error status"
                );
            }
            Outcome::TransportFailure(cause) => {
                self.stats.transport_failures += 1;
                warn!(event, listener = name, address, %cause, "could not reach listener");
            }
        }
    }
}
