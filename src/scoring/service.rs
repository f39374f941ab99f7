//! Score delta formula.
//!
//! ## Success
//!
//! `base + field_scalar * correct + round(spawn_scalar * pressure) + round(speed_bonus_max * remaining)`
//!
//! - `pressure`: how far the arrival delay has shrunk, clamped to `[0, 1]`
//! - `remaining`: fraction of the form's timer left (0 for untimed forms)
//!
//! ## Failure
//!
//! `-(base + field_scalar * incorrect_or_empty)`
//!
//! Rounding is half-to-even. With `clamp_to_zero` the score never goes
//! negative, and the reported delta is the change actually applied.

use serde::{Deserialize, Serialize};

use super::session::ScoreSession;
use crate::core::ScoreConfig;
use crate::forms::{Form, ValidationResult};

/// Score after a change, and the change applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreChange {
    pub score: i64,
    pub delta: i64,
}

fn round_to_int(value: f32) -> i64 {
    value.round_ties_even() as i64
}

/// Running score of a run.
#[derive(Clone, Debug, Default)]
pub struct ScoreService {
    config: ScoreConfig,
    current: i64,
    session: ScoreSession,
}

impl ScoreService {
    #[must_use]
    pub fn new(config: ScoreConfig) -> Self {
        Self {
            config,
            current: 0,
            session: ScoreSession::default(),
        }
    }

    /// Continue from a session carried over from an earlier run.
    #[must_use]
    pub fn with_session(mut self, session: ScoreSession) -> Self {
        self.current = session.current();
        self.session = session;
        self
    }

    #[must_use]
    pub fn current(&self) -> i64 {
        self.current
    }

    #[must_use]
    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &ScoreSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ScoreSession {
        &mut self.session
    }

    /// Zero the score for a new run.
    pub fn reset(&mut self) -> ScoreChange {
        let delta = -self.current;
        self.current = 0;
        self.session.reset();
        ScoreChange { score: 0, delta }
    }

    /// Points a resolution is worth, before clamping.
    #[must_use]
    pub fn delta_for(
        &self,
        is_success: bool,
        form: Option<&Form>,
        validation: &ValidationResult,
        spawn_pressure: f32,
    ) -> i64 {
        let c = &self.config;
        if is_success {
            let field_bonus = c.field_scalar * i64::from(validation.correct_fields);
            let spawn_bonus = round_to_int(c.spawn_scalar as f32 * spawn_pressure.clamp(0.0, 1.0));
            let speed_bonus = form.map_or(0, |f| {
                round_to_int(c.speed_bonus_max as f32 * f.remaining_time_normalized())
            });
            c.base_points + field_bonus + spawn_bonus + speed_bonus
        } else {
            -(c.base_points + c.field_scalar * i64::from(validation.incorrect_or_empty_fields))
        }
    }

    /// Apply a resolved form to the score.
    pub fn apply_submission(
        &mut self,
        is_success: bool,
        form: Option<&Form>,
        validation: &ValidationResult,
        spawn_pressure: f32,
    ) -> ScoreChange {
        let delta = self.delta_for(is_success, form, validation, spawn_pressure);

        let before = self.current;
        self.current += delta;
        if self.config.clamp_to_zero {
            self.current = self.current.max(0);
        }
        self.session.set_score(self.current);

        ScoreChange {
            score: self.current,
            delta: self.current - before,
        }
    }
}
