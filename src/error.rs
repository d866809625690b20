use thiserror::Error;

/// Errors surfaced by the registry to its callers.
///
/// Delivery failures are deliberately absent: they are logged inside the
/// broadcast and never reach the publisher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublisherError {
    /// Publish targeted an event name that no listener was ever registered under.
    #[error("event not registered: {0}")]
    EventNotRegistered(String),
    /// The registry actor has stopped and no longer services operations.
    #[error("registry is shut down")]
    Shutdown,
}

impl PublisherError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            PublisherError::EventNotRegistered(_) => 404,
            PublisherError::Shutdown => 503,
        }
    }
}

/// A listener failed field validation before reaching the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("empty 'name' field")]
    EmptyName,
    #[error("empty 'event' field")]
    EmptyEvent,
    #[error("empty 'address' field")]
    EmptyAddress,
}

/// An environment setting could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}
