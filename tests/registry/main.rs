//! Registry actor integration tests.
//!
//! Drives the actor through `RegistryHandle` with a recording notifier:
//! - Registration, overwrite and cross-event discard
//! - Broadcast fan-out and the not-registered path
//! - Concurrent producers
