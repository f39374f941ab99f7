//! Core engine types: ids, RNG, flags, game state, configuration, errors.
//!
//! Everything here is independent of how forms look or are laid out.

pub mod config;
pub mod error;
pub mod flags;
pub mod ids;
pub mod rng;
pub mod state;

pub use config::{ArrivalConfig, LoseConfig, ScoreConfig, SessionConfig};
pub use error::{ConfigError, FormDeskError, Result};
pub use flags::{Flag, FlagStore};
pub use ids::{
    FilterGroupId, FlagId, FormId, FormInstanceId, IdAllocator, WordBlockDefId, WordBlockId,
};
pub use rng::GameRng;
pub use state::{GameState, GameStateSnapshot, SubmissionCounters};
