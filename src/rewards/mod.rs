//! Form rewards.
//!
//! - `FormReward`: grant a word block or set a flag
//! - `RewardTiming`: receive, correct resolution, wrong resolution
//! - `RewardResolver`: applies rewards through a `RewardContext`
//!
//! Rewards only record flag changes; the form manager decides when to
//! re-evaluate group unlocks.

mod resolver;
mod reward;

pub use resolver::{RewardContext, RewardResolver, RewardResult};
pub use reward::{FormReward, FormRewards, RewardList, RewardTiming};
