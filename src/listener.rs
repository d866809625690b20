use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An HTTP callback registered under a named event.
///
/// `address` is expected to look like `http://domain.com/endpoint` but is not
/// checked here; only emptiness is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listener {
    pub event: String,
    pub name: String,
    pub address: String,
}

impl Listener {
    pub fn new(
        event: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            event: event.into(),
            name: name.into(),
            address: address.into(),
        }
    }

    /// Reject listeners with any empty field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.event.is_empty() {
            return Err(ValidationError::EmptyEvent);
        }
        if self.address.is_empty() {
            return Err(ValidationError::EmptyAddress);
        }
        Ok(())
    }
}
