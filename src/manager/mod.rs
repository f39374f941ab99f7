//! Form lifecycle: the `FormManager` state machine and what it reports.
//!
//! - [`FormManager`]: desk, incoming queue, timers, resolution, lose check
//! - [`FormEvent`]: queued notifications for the host
//! - [`Resolution`]: full outcome of a submit, discard or expiry

#[allow(clippy::module_inception)]
mod manager;
mod events;

pub use events::{FailureReason, FormEvent, LoseReason, Resolution, ResolutionKind};
pub use manager::{FormManager, MAX_ARRIVALS_PER_TICK};
