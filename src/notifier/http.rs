use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use super::{Notifier, Outcome};

/// Default bound on a single delivery attempt.
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Notifier that POSTs the raw body to the listener address.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
}

impl HttpNotifier {
    /// Build a notifier whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn send(&self, address: &str, body: Bytes) -> Outcome {
        let result = self
            .client
            .post(address)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await;

        match result {
            Ok(resp) if resp.status() == StatusCode::OK => Outcome::Delivered,
            Ok(resp) => Outcome::RespondedWithError(resp.status().as_u16()),
            Err(err) => Outcome::TransportFailure(err.to_string()),
        }
    }
}
