//! Registry tuning and process configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::notifier::DEFAULT_DELIVERY_TIMEOUT;

/// Default mailbox capacity: producers wait once this many operations are queued.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 10;

/// How one publish fans out to the listeners of its event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FanOut {
    /// One listener after another, inside the actor's turn.
    #[default]
    Sequential,
    /// All listeners at once; the actor still waits for every attempt.
    Concurrent,
}

impl FromStr for FanOut {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(FanOut::Sequential),
            "concurrent" => Ok(FanOut::Concurrent),
            _ => Err(()),
        }
    }
}

/// Registry actor settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    pub mailbox_capacity: usize,
    pub delivery_timeout: Duration,
    pub fan_out: FanOut,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            delivery_timeout: DEFAULT_DELIVERY_TIMEOUT,
            fan_out: FanOut::Sequential,
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity;
        self
    }

    pub fn delivery_timeout(mut self, timeout: Duration) -> Self {
        self.delivery_timeout = timeout;
        self
    }

    pub fn fan_out(mut self, fan_out: FanOut) -> Self {
        self.fan_out = fan_out;
        self
    }
}

/// Process settings for the HTTP server binary.
///
/// | Variable | Default |
/// |---|---|
/// | `PUBLISHER_HOST` | `0.0.0.0` |
/// | `PUBLISHER_PORT` | `8080` |
/// | `PUBLISHER_REQUEST_TIMEOUT_MS` | `10000` |
/// | `PUBLISHER_MAILBOX_CAPACITY` | `10` |
/// | `PUBLISHER_DELIVERY_TIMEOUT_MS` | `3000` |
/// | `PUBLISHER_FAN_OUT` | `sequential` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
    pub registry: RegistryConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout: Duration::from_secs(10),
            registry: RegistryConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let mailbox_capacity = parse(&lookup, "PUBLISHER_MAILBOX_CAPACITY")?
            .unwrap_or(defaults.registry.mailbox_capacity);
        if mailbox_capacity == 0 {
            return Err(ConfigError::Invalid {
                key: "PUBLISHER_MAILBOX_CAPACITY",
                value: "0".to_string(),
            });
        }

        let fan_out = match lookup("PUBLISHER_FAN_OUT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "PUBLISHER_FAN_OUT",
                value: raw,
            })?,
            None => defaults.registry.fan_out,
        };

        Ok(Self {
            host: lookup("PUBLISHER_HOST").unwrap_or(defaults.host),
            port: parse(&lookup, "PUBLISHER_PORT")?.unwrap_or(defaults.port),
            request_timeout: parse(&lookup, "PUBLISHER_REQUEST_TIMEOUT_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.request_timeout),
            registry: RegistryConfig {
                mailbox_capacity,
                delivery_timeout: parse(&lookup, "PUBLISHER_DELIVERY_TIMEOUT_MS")?
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.registry.delivery_timeout),
                fan_out,
            },
        })
    }

    /// `host:port` suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(None),
    }
}
