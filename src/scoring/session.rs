//! Score carried across runs.

use serde::{Deserialize, Serialize};

/// Score bookkeeping that outlives a single run.
///
/// The lose screen reads `final_score`; a retry starts a fresh run but
/// keeps the previous final score and the best score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSession {
    current: i64,
    final_score: Option<i64>,
    best: i64,
}

impl ScoreSession {
    #[must_use]
    pub fn current(&self) -> i64 {
        self.current
    }

    /// Score of the last finished run.
    #[must_use]
    pub fn final_score(&self) -> Option<i64> {
        self.final_score
    }

    /// Best final score seen in this session.
    #[must_use]
    pub fn best(&self) -> i64 {
        self.best
    }

    pub fn set_score(&mut self, score: i64) {
        self.current = score;
    }

    /// Freeze the current score as the run's final score.
    pub fn finish(&mut self) -> i64 {
        self.final_score = Some(self.current);
        self.best = self.best.max(self.current);
        self.current
    }

    /// Zero the running score, keeping final and best scores.
    pub fn reset(&mut self) {
        self.current = 0;
    }
}
