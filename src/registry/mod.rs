//! Registry actor - the single owner of listener registrations.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐   bounded mailbox   ┌──────────────────────────┐
//! │ RegistryHandle   │ ──── Operation ───► │ RegistryActor            │
//! │ (one per caller) │                     │  - owns ListenerDirectory│
//! │ waits on oneshot │ ◄── completion ──── │  - one op at a time      │
//! └──────────────────┘                     └────────────┬─────────────┘
//!                                                       │ publish
//!                                                       ▼
//!                                              Notifier::send × N
//! ```
//!
//! Operations are totally ordered by mailbox arrival. A publish submitted
//! after a register has completed always sees that registration.

mod actor;
mod handle;
mod operation;

pub use actor::RegistryStats;
pub use handle::{Registry, RegistryHandle};
pub use operation::PublishReceipt;
