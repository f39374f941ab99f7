//! Form definition registry.

use rustc_hash::FxHashMap;

use super::definition::FormDefinition;
use crate::core::FormId;

/// Registry of form definitions.
///
/// Holds both authored definitions and the runtime definitions created by
/// prompt-based spawn sources.
///
/// ## Example
///
/// ```
/// use form_desk::core::FormId;
/// use form_desk::forms::{FormDefinition, FormRegistry};
///
/// let mut registry = FormRegistry::new();
/// registry.register(FormDefinition::new(FormId::new(1), "visa"));
///
/// assert_eq!(registry.get(FormId::new(1)).unwrap().item_id, "visa");
/// ```
#[derive(Clone, Debug, Default)]
pub struct FormRegistry {
    forms: FxHashMap<FormId, FormDefinition>,
    next_id: u32,
}

impl FormRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition.
    ///
    /// Panics if a definition with the same id already exists.
    pub fn register(&mut self, form: FormDefinition) {
        if self.forms.contains_key(&form.id) {
            panic!("Form with ID {:?} already registered", form.id);
        }
        self.next_id = self.next_id.max(form.id.raw().saturating_add(1));
        self.forms.insert(form.id, form);
    }

    /// Register a definition under a fresh id, overwriting the id it carries.
    ///
    /// Ids already in use are skipped; the counter wraps past `u32::MAX`.
    pub fn register_auto(&mut self, mut form: FormDefinition) -> FormId {
        let mut raw = self.next_id;
        while self.forms.contains_key(&FormId::new(raw)) {
            raw = raw.wrapping_add(1);
        }
        let id = FormId::new(raw);
        form.id = id;
        self.forms.insert(id, form);
        self.next_id = raw.wrapping_add(1);
        id
    }

    #[must_use]
    pub fn get(&self, id: FormId) -> Option<&FormDefinition> {
        self.forms.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: FormId) -> bool {
        self.forms.contains_key(&id)
    }

    /// Remove a definition (runtime definitions are dropped once resolved).
    pub fn remove(&mut self, id: FormId) -> Option<FormDefinition> {
        self.forms.remove(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormDefinition> {
        self.forms.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut registry = FormRegistry::new();
        registry.register(FormDefinition::new(FormId::new(3), "a"));

        assert!(registry.contains(FormId::new(3)));
        assert!(registry.get(FormId::new(4)).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_auto_skips_used_ids() {
        let mut registry = FormRegistry::new();
        registry.register(FormDefinition::new(FormId::new(5), "authored"));

        let id = registry.register_auto(FormDefinition::new(FormId::new(0), "runtime"));
        assert_eq!(id, FormId::new(6));
        assert_eq!(registry.get(id).unwrap().id, id);

        let next = registry.register_auto(FormDefinition::new(FormId::new(0), "runtime"));
        assert_eq!(next, FormId::new(7));
    }

    #[test]
    fn test_register_auto_after_max_id() {
        let mut registry = FormRegistry::new();
        registry.register(FormDefinition::new(FormId::new(u32::MAX), "last"));

        let first = registry.register_auto(FormDefinition::new(FormId::new(0), "runtime"));
        let second = registry.register_auto(FormDefinition::new(FormId::new(0), "runtime"));

        assert_eq!(first, FormId::new(0));
        assert_eq!(second, FormId::new(1));
        assert_eq!(registry.get(FormId::new(u32::MAX)).unwrap().item_id, "last");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_id_panics() {
        let mut registry = FormRegistry::new();
        registry.register(FormDefinition::new(FormId::new(1), "a"));
        registry.register(FormDefinition::new(FormId::new(1), "b"));
    }

    #[test]
    fn test_remove() {
        let mut registry = FormRegistry::new();
        registry.register(FormDefinition::new(FormId::new(1), "a"));
        assert!(registry.remove(FormId::new(1)).is_some());
        assert!(registry.is_empty());
    }
}
