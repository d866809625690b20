use bytes::Bytes;
use tokio::sync::oneshot;

use crate::error::PublisherError;
use crate::listener::Listener;

/// Acknowledgement for a publish: how many listeners were attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishReceipt {
    pub attempted: usize,
}

/// Work submitted to the registry mailbox.
///
/// Every variant except `Stop` carries a one-shot completion handle that the
/// actor fires exactly once, after the operation has been fully applied.
pub(crate) enum Operation {
    Add {
        listener: Listener,
        done: oneshot::Sender<()>,
    },
    Discard {
        name: String,
        done: oneshot::Sender<()>,
    },
    Publish {
        event: String,
        body: Bytes,
        done: oneshot::Sender<Result<PublishReceipt, PublisherError>>,
    },
    Listeners {
        event: String,
        done: oneshot::Sender<Option<Vec<(String, String)>>>,
    },
    Stop,
}

impl Operation {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Operation::Add { .. } => "add",
            Operation::Discard { .. } => "discard",
            Operation::Publish { .. } => "publish",
            Operation::Listeners { .. } => "listeners",
            Operation::Stop => "stop",
        }
    }
}
