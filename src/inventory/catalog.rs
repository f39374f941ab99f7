//! Inventory catalog: the word blocks the player can currently take.
//!
//! The catalog keeps the unlocked definitions in unlock order and the
//! filter groups (tabs) derived from them. The player pulls fresh blocks
//! out of it; rewards add new definitions to it.

use crate::core::{FilterGroupId, IdAllocator, WordBlockDefId, WordBlockId};
use crate::forms::WordBlock;

use super::definition::{FilterGroup, WordBlockDefinition};

/// Unlocked word block definitions with optional tab filtering.
#[derive(Clone, Debug)]
pub struct InventoryCatalog {
    unlocked: Vec<WordBlockDefinition>,
    filter_groups: Vec<FilterGroup>,
    active_filter: Option<FilterGroupId>,
    allow_duplicates: bool,
    auto_filter_groups: bool,
    block_ids: IdAllocator,
}

impl Default for InventoryCatalog {
    fn default() -> Self {
        Self {
            unlocked: Vec::new(),
            filter_groups: Vec::new(),
            active_filter: None,
            allow_duplicates: true,
            auto_filter_groups: true,
            block_ids: IdAllocator::default(),
        }
    }
}

impl InventoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse to unlock a definition that is already unlocked.
    #[must_use]
    pub fn without_duplicates(mut self) -> Self {
        self.allow_duplicates = false;
        self
    }

    /// Use a fixed list of filter groups
    /// instead of deriving them from unlocked definitions.
    #[must_use]
    pub fn with_manual_filter_groups(mut self, groups: Vec<FilterGroup>) -> Self {
        self.auto_filter_groups = false;
        self.filter_groups = groups;
        self
    }

    /// Reset the catalog to the definitions that start unlocked.
    pub fn build_initial(&mut self, definitions: &[WordBlockDefinition]) {
        self.unlocked.clear();
        for def in definitions.iter().filter(|d| d.unlocked_at_start) {
            self.push_definition(def.clone());
        }
        if self.auto_filter_groups {
            self.rebuild_filter_groups();
        }
    }

    fn push_definition(&mut self, def: WordBlockDefinition) -> bool {
        if !self.allow_duplicates && self.contains(def.id) {
            return false;
        }
        self.unlocked.push(def);
        true
    }

    /// Unlock a definition. Returns `false` if refused as a duplicate.
    pub fn add_definition(&mut self, def: WordBlockDefinition) -> bool {
        let group = def.filter_group.clone();
        if !self.push_definition(def) {
            return false;
        }
        if self.auto_filter_groups {
            if let Some(group) = group {
                self.ensure_filter_group(group);
            }
        }
        true
    }

    /// Remove one unlocked copy of a definition.
    pub fn remove_definition(&mut self, id: WordBlockDefId) -> bool {
        let Some(pos) = self.unlocked.iter().position(|d| d.id == id) else {
            return false;
        };
        self.unlocked.remove(pos);
        if self.auto_filter_groups {
            self.rebuild_filter_groups();
        }
        true
    }

    #[must_use]
    pub fn contains(&self, id: WordBlockDefId) -> bool {
        self.unlocked.iter().any(|d| d.id == id)
    }

    #[must_use]
    pub fn unlocked(&self) -> &[WordBlockDefinition] {
        &self.unlocked
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.unlocked.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unlocked.is_empty()
    }

    // === Filtering ===

    #[must_use]
    pub fn filter_groups(&self) -> &[FilterGroup] {
        &self.filter_groups
    }

    #[must_use]
    pub fn active_filter(&self) -> Option<FilterGroupId> {
        self.active_filter
    }

    pub fn set_filter(&mut self, group: FilterGroupId) {
        self.active_filter = Some(group);
    }

    pub fn clear_filter(&mut self) {
        self.active_filter = None;
    }

    /// Re-derive filter groups from the unlocked definitions.
    pub fn refresh_filter_groups(&mut self) {
        self.rebuild_filter_groups();
    }

    /// Definitions visible under the active filter.
    pub fn visible(&self) -> impl Iterator<Item = &WordBlockDefinition> {
        let filter = self.active_filter;
        self.unlocked.iter().filter(move |d| match filter {
            None => true,
            Some(active) => d.filter_group.as_ref().is_some_and(|g| g.id == active),
        })
    }

    fn ensure_filter_group(&mut self, group: FilterGroup) {
        if !self.filter_groups.iter().any(|g| g.id == group.id) {
            self.filter_groups.push(group);
        }
    }

    fn rebuild_filter_groups(&mut self) {
        self.filter_groups.clear();
        let groups: Vec<FilterGroup> = self
            .unlocked
            .iter()
            .filter_map(|d| d.filter_group.clone())
            .collect();
        for group in groups {
            self.ensure_filter_group(group);
        }

        if let Some(active) = self.active_filter {
            if !self.filter_groups.iter().any(|g| g.id == active) {
                self.active_filter = None;
            }
        }
    }

    // === Blocks ===

    /// Take a fresh block of an unlocked definition.
    pub fn spawn_block(&mut self, id: WordBlockDefId) -> Option<WordBlock> {
        let def = self.unlocked.iter().find(|d| d.id == id)?;
        let block_id = WordBlockId::new(self.block_ids.next_raw());
        Some(def.instantiate(block_id))
    }
}
