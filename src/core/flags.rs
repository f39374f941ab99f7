//! Boolean game flags.
//!
//! Flags are the only global switches in the game. Form groups unlock
//! when their flag conditions hold, and rewards flip flags to open up new
//! groups.
//!
//! The store records every observable change so the form manager can
//! re-evaluate group availability after a batch of rewards, instead of
//! being called back in the middle of one.
//!
//! ```
//! use form_desk::core::{Flag, FlagId, FlagStore};
//!
//! let mut flags = FlagStore::new();
//! flags.register(Flag::new(FlagId::new(0), "MetTheClerk"), false, true);
//!
//! assert!(flags.set_by_name("metTheClerk", true));
//! assert!(flags.get(FlagId::new(0)));
//! assert_eq!(flags.take_changes(), vec![(FlagId::new(0), true)]);
//! ```

use im::HashMap as ImHashMap;
use serde::{Deserialize, Serialize};

use super::ids::FlagId;

/// A named boolean flag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flag {
    pub id: FlagId,
    pub name: String,
}

impl Flag {
    pub fn new(id: FlagId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Flag states plus a case-insensitive name index.
///
/// Backed by `im` maps: cloning the store is O(1), which is what the
/// manager relies on to snapshot the start-of-run state for retries.
#[derive(Clone, Debug, Default)]
pub struct FlagStore {
    flags: ImHashMap<FlagId, Flag>,
    states: ImHashMap<FlagId, bool>,
    by_name: ImHashMap<String, FlagId>,
    changes: Vec<(FlagId, bool)>,
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl FlagStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a flag (or re-register it), overwriting its state.
    ///
    /// Blank names are accepted but not indexed. A non-silent registration
    /// counts as a change.
    pub fn register(&mut self, flag: Flag, initial_state: bool, silent: bool) {
        let id = flag.id;
        if !flag.name.trim().is_empty() {
            self.by_name.insert(name_key(&flag.name), id);
        }
        self.flags.insert(id, flag);
        self.states.insert(id, initial_state);

        if !silent {
            self.changes.push((id, initial_state));
        }
    }

    /// Set a flag's state.
    ///
    /// Unknown flags are registered on the fly (unnamed). Returns `true`
    /// when the state actually changed.
    pub fn set(&mut self, id: FlagId, state: bool) -> bool {
        match self.states.get(&id).copied() {
            None => {
                self.register(Flag::new(id, String::new()), state, true);
                self.changes.push((id, state));
                true
            }
            Some(current) if current == state => false,
            Some(_) => {
                self.states.insert(id, state);
                self.changes.push((id, state));
                true
            }
        }
    }

    /// Set a flag by (case-insensitive) name.
    ///
    /// Blank names are ignored; unknown names log a warning. Returns `true`
    /// when the state actually changed.
    pub fn set_by_name(&mut self, name: &str, state: bool) -> bool {
        if name.trim().is_empty() {
            return false;
        }

        match self.lookup(name) {
            Some(id) => self.set(id, state),
            None => {
                tracing::warn!(flag = name, "flag not found");
                false
            }
        }
    }

    /// Get a flag's state. Unknown flags read as `false`.
    #[must_use]
    pub fn get(&self, id: FlagId) -> bool {
        self.states.get(&id).copied().unwrap_or(false)
    }

    /// Get a flag's state by name. Blank or unknown names read as `false`.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }
        self.lookup(name).is_some_and(|id| self.get(id))
    }

    /// Resolve a flag name to its id.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<FlagId> {
        self.by_name.get(&name_key(name)).copied()
    }

    /// Get a registered flag.
    #[must_use]
    pub fn flag(&self, id: FlagId) -> Option<&Flag> {
        self.flags.get(&id)
    }

    /// Set every registered flag to `default_state`.
    pub fn reset(&mut self, default_state: bool) {
        let mut ids: Vec<FlagId> = self.flags.keys().copied().collect();
        ids.sort_unstable();
        for id in ids {
            self.set(id, default_state);
        }
    }

    /// Number of registered flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// True when no flag is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Iterate `(flag, state)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Flag, bool)> {
        self.flags.values().map(move |f| (f, self.get(f.id)))
    }

    /// True if changes are waiting to be drained.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Drain the recorded changes in the order they happened.
    pub fn take_changes(&mut self) -> Vec<(FlagId, bool)> {
        std::mem::take(&mut self.changes)
    }
}
