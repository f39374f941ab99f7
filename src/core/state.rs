//! Global game state: flags, submission counters, owned word blocks.
//!
//! The arrival delay between forms is derived from this state: every
//! successful submission makes the next form arrive a little sooner, down
//! to the configured minimum.

use serde::{Deserialize, Serialize};

use super::config::ArrivalConfig;
use super::flags::FlagStore;
use super::ids::WordBlockId;
use crate::forms::WordBlock;

/// Running totals of how forms were resolved.
///
/// `failed` includes expired forms and wrongly discarded forms, so it is
/// the number the lose condition looks at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionCounters {
    pub successful: u32,
    pub failed: u32,
    pub discarded: u32,
    pub expired: u32,
}

impl SubmissionCounters {
    /// Total number of resolved forms.
    #[must_use]
    pub fn resolved(&self) -> u32 {
        self.successful + self.failed
    }
}

/// Cheap copy of the parts of [`GameState`] a retry restores.
#[derive(Clone, Debug)]
pub struct GameStateSnapshot {
    flags: FlagStore,
    counters: SubmissionCounters,
}

/// Game-wide state shared by the form manager and rewards.
#[derive(Clone, Debug, Default)]
pub struct GameState {
    /// Flag store.
    pub flags: FlagStore,

    counters: SubmissionCounters,
    arrival: ArrivalConfig,
    owned_blocks: Vec<WordBlock>,
}

impl GameState {
    /// Create a state with the given arrival settings.
    #[must_use]
    pub fn new(arrival: ArrivalConfig) -> Self {
        Self {
            flags: FlagStore::new(),
            counters: SubmissionCounters::default(),
            arrival,
            owned_blocks: Vec::new(),
        }
    }

    #[must_use]
    pub fn counters(&self) -> SubmissionCounters {
        self.counters
    }

    #[must_use]
    pub fn arrival(&self) -> &ArrivalConfig {
        &self.arrival
    }

    // === Arrival timing ===

    /// Seconds until the next form arrives at the current pace.
    #[must_use]
    pub fn arrival_delay(&self) -> f32 {
        self.arrival.delay_after(self.counters.successful)
    }

    /// Normalized pace in `[0, 1]`: 0 at the initial delay, 1 at the minimum.
    #[must_use]
    pub fn spawn_pressure(&self) -> f32 {
        self.arrival.pressure_at(self.arrival_delay())
    }

    // === Counters ===

    pub fn record_success(&mut self) {
        self.counters.successful += 1;
    }

    pub fn record_failure(&mut self) {
        self.counters.failed += 1;
    }

    /// A discard. `correct` is true when the form was meant to be discarded.
    pub fn record_discard(&mut self, correct: bool) {
        self.counters.discarded += 1;
        if correct {
            self.counters.successful += 1;
        } else {
            self.counters.failed += 1;
        }
    }

    /// A form whose timer ran out. Also counts as a failure.
    pub fn record_expiry(&mut self) {
        self.counters.expired += 1;
        self.counters.failed += 1;
    }

    // === Word blocks ===

    /// Track a word block handed to the player. Duplicate ids are ignored.
    pub fn register_word_block(&mut self, block: WordBlock) -> bool {
        if self.owned_blocks.iter().any(|b| b.id == block.id) {
            return false;
        }
        self.owned_blocks.push(block);
        true
    }

    /// Stop tracking a word block.
    pub fn unregister_word_block(&mut self, id: WordBlockId) -> Option<WordBlock> {
        let pos = self.owned_blocks.iter().position(|b| b.id == id)?;
        Some(self.owned_blocks.remove(pos))
    }

    #[must_use]
    pub fn owned_word_blocks(&self) -> &[WordBlock] {
        &self.owned_blocks
    }

    // === Snapshots ===

    /// Capture flags and counters.
    #[must_use]
    pub fn snapshot(&self) -> GameStateSnapshot {
        GameStateSnapshot {
            flags: self.flags.clone(),
            counters: self.counters,
        }
    }

    /// Restore flags and counters captured by [`GameState::snapshot`].
    ///
    /// Pending flag changes are dropped along with the old store.
    pub fn restore(&mut self, snapshot: &GameStateSnapshot) {
        self.flags = snapshot.flags.clone();
        self.flags.take_changes();
        self.counters = snapshot.counters;
        self.owned_blocks.clear();
    }
}
