mod config;
mod directory;
mod error;
mod listener;
pub mod notifier;
pub mod registry;

#[cfg(feature = "http")]
pub mod http;

pub use config::{FanOut, RegistryConfig, ServerConfig, DEFAULT_MAILBOX_CAPACITY};
pub use directory::ListenerDirectory;
pub use error::{ConfigError, PublisherError, ValidationError};
pub use listener::Listener;
pub use notifier::{HttpNotifier, Notifier, Outcome, RecordingNotifier};
pub use registry::{PublishReceipt, Registry, RegistryHandle, RegistryStats};
