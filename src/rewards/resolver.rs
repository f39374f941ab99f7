//! Reward resolution.

use crate::core::GameState;
use crate::forms::{Form, FormDefinition};
use crate::inventory::InventoryCatalog;

use super::reward::FormReward;

/// Everything a reward may touch, plus the form it came from.
pub struct RewardContext<'a> {
    pub state: &'a mut GameState,
    pub inventory: &'a mut InventoryCatalog,
    pub definition: &'a FormDefinition,
    /// The live form, when the reward comes from one.
    pub form: Option<&'a Form>,
}

/// Result of applying a reward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RewardResult {
    /// The reward changed game state.
    Applied,
    /// The reward was valid but changed nothing (flag already in that state).
    Unchanged,
    /// The reward could not be applied.
    Skipped(String),
}

/// Applies rewards to game state.
pub struct RewardResolver;

impl RewardResolver {
    /// Apply rewards in order.
    pub fn apply_all<'r>(
        rewards: impl IntoIterator<Item = &'r FormReward>,
        ctx: &mut RewardContext<'_>,
    ) -> Vec<RewardResult> {
        rewards
            .into_iter()
            .map(|reward| Self::apply(reward, ctx))
            .collect()
    }

    /// Apply a single reward.
    pub fn apply(reward: &FormReward, ctx: &mut RewardContext<'_>) -> RewardResult {
        let result = match reward {
            FormReward::GrantWordBlock(def) => {
                if ctx.inventory.add_definition(def.clone()) {
                    RewardResult::Applied
                } else {
                    RewardResult::Skipped(format!("{} already unlocked", def.id))
                }
            }

            FormReward::SetFlag { flag, state } => {
                if ctx.state.flags.set(*flag, *state) {
                    RewardResult::Applied
                } else {
                    RewardResult::Unchanged
                }
            }

            FormReward::SetFlagByName { name, state } => {
                if ctx.state.flags.lookup(name).is_none() {
                    RewardResult::Skipped(format!("unknown flag '{name}'"))
                } else if ctx.state.flags.set_by_name(name, *state) {
                    RewardResult::Applied
                } else {
                    RewardResult::Unchanged
                }
            }
        };

        tracing::debug!(
            form = %ctx.definition.id,
            instance = ?ctx.form.map(|f| f.instance_id),
            ?reward,
            ?result,
            "reward resolved"
        );
        result
    }
}
