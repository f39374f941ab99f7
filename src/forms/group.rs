//! Form groups: bundles of forms gated by flags.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{FlagId, FlagStore, FormId};

/// Flag list of a group condition. Groups rarely test more than a few flags.
pub type FlagList = SmallVec<[FlagId; 4]>;

/// A named set of form definitions that becomes available when its flag
/// condition holds.
///
/// The condition is: every `flags_on` flag is set **and** no `flags_off`
/// flag is set. Empty lists impose nothing, so a group with no flags is
/// always unlocked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormGroup {
    pub name: String,
    pub forms: Vec<FormId>,
    #[serde(default)]
    pub flags_on: FlagList,
    #[serde(default)]
    pub flags_off: FlagList,
}

impl FormGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            forms: Vec::new(),
            flags_on: FlagList::new(),
            flags_off: FlagList::new(),
        }
    }

    #[must_use]
    pub fn with_form(mut self, form: FormId) -> Self {
        self.forms.push(form);
        self
    }

    #[must_use]
    pub fn requires_on(mut self, flag: FlagId) -> Self {
        self.flags_on.push(flag);
        self
    }

    #[must_use]
    pub fn requires_off(mut self, flag: FlagId) -> Self {
        self.flags_off.push(flag);
        self
    }

    /// Evaluate the unlock condition against the current flags.
    #[must_use]
    pub fn is_unlocked(&self, flags: &FlagStore) -> bool {
        self.flags_on.iter().all(|&f| flags.get(f)) && !self.flags_off.iter().any(|&f| flags.get(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Flag;

    const INTRO_DONE: FlagId = FlagId::new(0);
    const FIRED: FlagId = FlagId::new(1);

    fn flags() -> FlagStore {
        let mut store = FlagStore::new();
        store.register(Flag::new(INTRO_DONE, "IntroDone"), false, true);
        store.register(Flag::new(FIRED, "Fired"), false, true);
        store
    }

    #[test]
    fn test_no_conditions_always_unlocked() {
        let group = FormGroup::new("starter").with_form(FormId::new(1));
        assert!(group.is_unlocked(&FlagStore::new()));
    }

    #[test]
    fn test_flags_on() {
        let mut store = flags();
        let group = FormGroup::new("late").requires_on(INTRO_DONE);

        assert!(!group.is_unlocked(&store));
        store.set(INTRO_DONE, true);
        assert!(group.is_unlocked(&store));
    }

    #[test]
    fn test_flags_off() {
        let mut store = flags();
        let group = FormGroup::new("employee")
            .requires_on(INTRO_DONE)
            .requires_off(FIRED);

        store.set(INTRO_DONE, true);
        assert!(group.is_unlocked(&store));

        store.set(FIRED, true);
        assert!(!group.is_unlocked(&store));
    }

    #[test]
    fn test_unknown_flag_reads_off() {
        let group = FormGroup::new("x").requires_off(FlagId::new(42));
        assert!(group.is_unlocked(&FlagStore::new()));

        let group = FormGroup::new("y").requires_on(FlagId::new(42));
        assert!(!group.is_unlocked(&FlagStore::new()));
    }
}
