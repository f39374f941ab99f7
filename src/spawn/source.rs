//! Spawn source trait.

use crate::core::{FormId, GameRng};
use crate::forms::FormRegistry;

/// Supplies forms beyond the ones unlocked through form groups.
///
/// The manager asks the source for its initial forms when a run starts,
/// then for one more form each time the arrival timer fires and the
/// incoming queue is empty.
///
/// Sources that build definitions at runtime register them in the
/// registry they are handed and may drop them again in
/// [`FormSpawnSource::release`].
pub trait FormSpawnSource {
    /// Reset internal state for a new run.
    fn initialize(&mut self, rng: &GameRng);

    /// Forms to put on the desk when the run starts.
    fn initial_forms(&mut self, registry: &mut FormRegistry) -> Vec<FormId>;

    /// The next form, or `None` when the source is exhausted.
    fn next_form(&mut self, registry: &mut FormRegistry) -> Option<FormId>;

    /// Called once a form from this source has left the desk.
    fn release(&mut self, _form: FormId, _registry: &mut FormRegistry) {}
}
