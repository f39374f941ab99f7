//! Session configuration.
//!
//! Hosts configure a session at startup with:
//! - `ScoreConfig`: score formula constants
//! - `ArrivalConfig`: how fast new forms arrive
//! - `LoseConfig`: when the run is over
//! - `SessionConfig`: all of the above plus spawn and RNG settings
//!
//! Every section has working defaults and can be built in code with the
//! `with_*` methods or loaded from JSON with [`SessionConfig::from_json`].
//! Missing JSON fields fall back to their defaults.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Score formula constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    /// Points for any successful form, and the base of every penalty.
    pub base_points: i64,
    /// Points per correct field on success, per wrong or empty field on failure.
    pub field_scalar: i64,
    /// Maximum bonus for submitting under full spawn pressure.
    pub spawn_scalar: i64,
    /// Maximum bonus for submitting with the whole timer left.
    pub speed_bonus_max: i64,
    /// Never let the score drop below zero.
    pub clamp_to_zero: bool,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            base_points: 100,
            field_scalar: 25,
            spawn_scalar: 60,
            speed_bonus_max: 50,
            clamp_to_zero: true,
        }
    }
}

/// Arrival delay between spawned forms.
///
/// The delay starts at `initial_delay_secs` and shrinks by
/// `delay_step_secs` for every successful submission, down to
/// `min_delay_secs`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrivalConfig {
    pub initial_delay_secs: f32,
    pub min_delay_secs: f32,
    pub delay_step_secs: f32,
}

impl Default for ArrivalConfig {
    fn default() -> Self {
        Self {
            initial_delay_secs: 12.0,
            min_delay_secs: 4.0,
            delay_step_secs: 0.75,
        }
    }
}

impl ArrivalConfig {
    /// Delay after `successful` submissions.
    #[must_use]
    pub fn delay_after(&self, successful: u32) -> f32 {
        let raw = self.initial_delay_secs - self.delay_step_secs * successful as f32;
        raw.clamp(self.min_delay_secs, self.initial_delay_secs)
    }

    /// How far `delay` has moved from the initial delay toward the minimum, in `[0, 1]`.
    #[must_use]
    pub fn pressure_at(&self, delay: f32) -> f32 {
        let span = self.initial_delay_secs - self.min_delay_secs;
        if span <= f32::EPSILON {
            return 0.0;
        }
        ((self.initial_delay_secs - delay) / span).clamp(0.0, 1.0)
    }
}

/// Lose conditions. `None` disables a condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoseConfig {
    /// Run ends once this many forms have failed (wrong, expired, or wrongly discarded).
    pub max_failures: Option<u32>,
    /// Run ends once more than this many forms sit on the desk.
    pub max_active_forms: Option<usize>,
}

impl Default for LoseConfig {
    fn default() -> Self {
        Self {
            max_failures: Some(3),
            max_active_forms: Some(6),
        }
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub score: ScoreConfig,
    pub arrival: ArrivalConfig,
    pub lose: LoseConfig,
    /// Forms requested from the spawn source when the run starts.
    pub initial_spawn_count: usize,
    /// Re-evaluate group unlocks whenever a flag changes.
    pub listen_for_flag_changes: bool,
    /// Start a new shuffled cycle when every prompt has been used.
    pub loop_prompts: bool,
    /// RNG seed.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            score: ScoreConfig::default(),
            arrival: ArrivalConfig::default(),
            lose: LoseConfig::default(),
            initial_spawn_count: 1,
            listen_for_flag_changes: true,
            loop_prompts: true,
            seed: 0,
        }
    }
}

impl SessionConfig {
    /// Create a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_score(mut self, score: ScoreConfig) -> Self {
        self.score = score;
        self
    }

    #[must_use]
    pub fn with_arrival(mut self, arrival: ArrivalConfig) -> Self {
        self.arrival = arrival;
        self
    }

    #[must_use]
    pub fn with_lose(mut self, lose: LoseConfig) -> Self {
        self.lose = lose;
        self
    }

    #[must_use]
    pub fn with_initial_spawn_count(mut self, count: usize) -> Self {
        self.initial_spawn_count = count;
        self
    }

    #[must_use]
    pub fn with_flag_listening(mut self, listen: bool) -> Self {
        self.listen_for_flag_changes = listen;
        self
    }

    #[must_use]
    pub fn with_loop_prompts(mut self, loop_prompts: bool) -> Self {
        self.loop_prompts = loop_prompts;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let arrival = &self.arrival;
        for (field, value) in [
            ("initial_delay_secs", arrival.initial_delay_secs),
            ("min_delay_secs", arrival.min_delay_secs),
            ("delay_step_secs", arrival.delay_step_secs),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
        }
        if arrival.min_delay_secs <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "min_delay_secs",
                value: arrival.min_delay_secs,
            });
        }
        if arrival.min_delay_secs > arrival.initial_delay_secs {
            return Err(ConfigError::MinExceedsInitial {
                min: arrival.min_delay_secs,
                initial: arrival.initial_delay_secs,
            });
        }
        if arrival.delay_step_secs < 0.0 {
            return Err(ConfigError::Negative {
                field: "delay_step_secs",
                value: arrival.delay_step_secs,
            });
        }
        if self.lose.max_failures == Some(0) {
            return Err(ConfigError::ZeroLimit("max_failures"));
        }
        if self.lose.max_active_forms == Some(0) {
            return Err(ConfigError::ZeroLimit("max_active_forms"));
        }
        Ok(())
    }
}
