//! Error types.

use thiserror::Error;

use super::ids::{FormId, FormInstanceId};

/// Rejected session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must be positive (got {value:.2})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative (got {value:.2})")]
    Negative { field: &'static str, value: f32 },
    #[error("minimum delay {min:.2}s exceeds initial delay {initial:.2}s")]
    MinExceedsInitial { min: f32, initial: f32 },
    #[error("{0} must be at least 1 when set")]
    ZeroLimit(&'static str),
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl PartialEq for ConfigError {
    fn eq(&self, other: &Self) -> bool {
        use ConfigError::*;
        match (self, other) {
            (NotFinite { field: a }, NotFinite { field: b }) => a == b,
            (NotPositive { field: a, value: x }, NotPositive { field: b, value: y })
            | (Negative { field: a, value: x }, Negative { field: b, value: y }) => a == b && x == y,
            (MinExceedsInitial { min: a, initial: x }, MinExceedsInitial { min: b, initial: y }) => {
                a == b && x == y
            }
            (ZeroLimit(a), ZeroLimit(b)) => a == b,
            // serde_json errors are compared by kind and position
            (Parse(a), Parse(b)) => {
                a.classify() == b.classify() && a.line() == b.line() && a.column() == b.column()
            }
            _ => false,
        }
    }
}

/// Errors returned by form lifecycle operations.
#[derive(Debug, Error, PartialEq)]
pub enum FormDeskError {
    #[error("no active form with id {0}")]
    UnknownForm(FormInstanceId),
    #[error("form definition {0} is not registered")]
    UnknownDefinition(FormId),
    #[error("slot {index} out of range for form with {len} slots")]
    SlotOutOfRange { index: usize, len: usize },
    #[error("session is over")]
    GameOver,
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, FormDeskError>;
