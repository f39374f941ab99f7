//! # form-desk
//!
//! Engine-independent core of a form filling desk game.
//!
//! The player drags typed word blocks into form slots, then submits or
//! discards each form before its timer runs out. Forms arrive faster with
//! every success, and groups of forms unlock as game flags change.
//!
//! ## Design Principles
//!
//! 1. **Host-driven**: No rendering, input or scene code. The host calls
//!    `tick(dt)`, forwards player intents, and drains `FormEvent`s.
//!
//! 2. **Owned state**: The flag store, counters, inventory and score all
//!    live inside one `FormManager`. There are no globals.
//!
//! 3. **Deterministic**: All randomness flows from the session seed, so a
//!    seed and an input sequence always replay the same run.
//!
//! ## Modules
//!
//! - `core`: ids, RNG, flags, game state, configuration, errors
//! - `forms`: word blocks, definitions, groups, live forms, validation
//! - `inventory`: unlocked word block definitions and filter tabs
//! - `rewards`: side effects of receiving and resolving forms
//! - `scoring`: score formula and the cross-run score session
//! - `spawn`: spawn sources and the prompt cycle
//! - `manager`: the `FormManager` lifecycle engine
//! - `games`: ready-made setups (`alpha`)

pub mod core;
pub mod forms;
pub mod games;
pub mod inventory;
pub mod manager;
pub mod rewards;
pub mod scoring;
pub mod spawn;

// Re-export commonly used types
pub use crate::core::{
    ArrivalConfig, ConfigError, Flag, FlagId, FlagStore, FormDeskError, FormId, FormInstanceId,
    GameRng, GameState, LoseConfig, Result, ScoreConfig, SessionConfig, SubmissionCounters,
    WordBlockDefId, WordBlockId,
};

pub use crate::forms::{
    ContentField, FieldType, FillSlotSpec, Form, FormDefinition, FormGroup, FormRegistry,
    ValidationResult, WordBlock,
};

pub use crate::inventory::{FilterGroup, InventoryCatalog, WordBlockDefinition};

pub use crate::rewards::{FormReward, RewardResult, RewardTiming};

pub use crate::scoring::{ScoreChange, ScoreService, ScoreSession};

pub use crate::spawn::{FormSpawnSource, PromptLibrary, PromptSpawnSource, PromptSpec};

pub use crate::manager::{FailureReason, FormEvent, FormManager, LoseReason, Resolution, ResolutionKind};

pub use crate::games::alpha::AlphaGameBuilder;
