//! Word block definitions.

use serde::{Deserialize, Serialize};

use crate::core::{FilterGroupId, WordBlockDefId, WordBlockId};
use crate::forms::{FieldType, WordBlock};

/// An inventory tab.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterGroup {
    pub id: FilterGroupId,
    pub name: String,
}

impl FilterGroup {
    pub fn new(id: FilterGroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A word block the inventory can hand out any number of times.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordBlockDefinition {
    pub id: WordBlockDefId,
    pub value_type: FieldType,
    pub value: String,
    #[serde(default)]
    pub filter_group: Option<FilterGroup>,
    /// Present in the inventory from the start of a run.
    #[serde(default = "default_true")]
    pub unlocked_at_start: bool,
    /// Label to show instead of the field type name.
    #[serde(default)]
    pub type_label_override: Option<String>,
}

fn default_true() -> bool {
    true
}

impl WordBlockDefinition {
    pub fn new(id: WordBlockDefId, value_type: FieldType, value: impl Into<String>) -> Self {
        Self {
            id,
            value_type,
            value: value.into(),
            filter_group: None,
            unlocked_at_start: true,
            type_label_override: None,
        }
    }

    #[must_use]
    pub fn in_group(mut self, group: FilterGroup) -> Self {
        self.filter_group = Some(group);
        self
    }

    /// Mark as locked until granted by a reward.
    #[must_use]
    pub fn locked(mut self) -> Self {
        self.unlocked_at_start = false;
        self
    }

    #[must_use]
    pub fn with_type_label(mut self, label: impl Into<String>) -> Self {
        self.type_label_override = Some(label.into());
        self
    }

    /// The label shown on blocks of this definition.
    #[must_use]
    pub fn type_label(&self) -> &str {
        self.type_label_override
            .as_deref()
            .unwrap_or_else(|| self.value_type.label())
    }

    /// Create a fresh block from this definition.
    #[must_use]
    pub fn instantiate(&self, id: WordBlockId) -> WordBlock {
        let block = WordBlock::new(id, self.value_type, self.value.clone());
        match &self.filter_group {
            Some(group) => block.with_filter_group(group.id),
            None => block,
        }
    }
}
