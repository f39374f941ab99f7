//! Scoring: the per-form score formula and the cross-run score session.

mod service;
mod session;

pub use service::{ScoreChange, ScoreService};
pub use session::ScoreSession;
