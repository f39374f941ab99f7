//! Reward definitions.
//!
//! Rewards are the side effects a form has on the rest of the game:
//! handing the player new word blocks and flipping flags that unlock
//! further form groups.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::FlagId;
use crate::inventory::WordBlockDefinition;

/// A single side effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormReward {
    /// Unlock a word block definition in the inventory.
    GrantWordBlock(WordBlockDefinition),

    /// Set a flag.
    SetFlag { flag: FlagId, state: bool },

    /// Set a flag looked up by name. Unknown names are skipped.
    SetFlagByName { name: String, state: bool },
}

impl FormReward {
    /// Shorthand for turning a flag on.
    pub fn raise(flag: FlagId) -> Self {
        Self::SetFlag { flag, state: true }
    }

    /// Shorthand for turning a flag off.
    pub fn lower(flag: FlagId) -> Self {
        Self::SetFlag { flag, state: false }
    }
}

/// When a reward fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardTiming {
    /// The form lands on the desk.
    OnReceive,
    /// The form is handled correctly.
    OnSubmitSuccess,
    /// The form is handled wrongly or runs out of time.
    OnSubmitFailure,
}

/// Most forms carry zero or one reward per timing.
pub type RewardList = SmallVec<[FormReward; 2]>;

/// Rewards of a form, grouped by timing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormRewards {
    pub on_receive: RewardList,
    pub on_submit_success: RewardList,
    pub on_submit_failure: RewardList,
}

impl FormRewards {
    #[must_use]
    pub fn get(&self, timing: RewardTiming) -> &RewardList {
        match timing {
            RewardTiming::OnReceive => &self.on_receive,
            RewardTiming::OnSubmitSuccess => &self.on_submit_success,
            RewardTiming::OnSubmitFailure => &self.on_submit_failure,
        }
    }

    pub fn push(&mut self, timing: RewardTiming, reward: FormReward) {
        match timing {
            RewardTiming::OnReceive => self.on_receive.push(reward),
            RewardTiming::OnSubmitSuccess => self.on_submit_success.push(reward),
            RewardTiming::OnSubmitFailure => self.on_submit_failure.push(reward),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.on_receive.is_empty() && self.on_submit_success.is_empty() && self.on_submit_failure.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut rewards = FormRewards::default();
        assert!(rewards.is_empty());

        rewards.push(RewardTiming::OnReceive, FormReward::raise(FlagId::new(1)));
        rewards.push(RewardTiming::OnSubmitFailure, FormReward::lower(FlagId::new(2)));

        assert_eq!(rewards.get(RewardTiming::OnReceive).len(), 1);
        assert!(rewards.get(RewardTiming::OnSubmitSuccess).is_empty());
        assert_eq!(
            rewards.get(RewardTiming::OnSubmitFailure)[0],
            FormReward::SetFlag { flag: FlagId::new(2), state: false }
        );
        assert!(!rewards.is_empty());
    }

    #[test]
    fn test_serialization() {
        let mut rewards = FormRewards::default();
        rewards.push(
            RewardTiming::OnSubmitSuccess,
            FormReward::SetFlagByName { name: "Promoted".into(), state: true },
        );

        let json = serde_json::to_string(&rewards).unwrap();
        let back: FormRewards = serde_json::from_str(&json).unwrap();
        assert_eq!(rewards, back);
    }
}
