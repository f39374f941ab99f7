//! Field types and word blocks.

use serde::{Deserialize, Serialize};

use crate::core::{FilterGroupId, WordBlockId};

/// The kind of value a fill slot expects and a word block carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldType {
    Name,
    Id,
    Date,
    Address,
    AnyText,
}

impl FieldType {
    /// All field types, in declaration order.
    pub const ALL: [FieldType; 5] = [
        FieldType::Name,
        FieldType::Id,
        FieldType::Date,
        FieldType::Address,
        FieldType::AnyText,
    ];

    /// Short label shown on a block.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            FieldType::Name => "Name",
            FieldType::Id => "ID",
            FieldType::Date => "Date",
            FieldType::Address => "Address",
            FieldType::AnyText => "Text",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A typed value the player drags into form slots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordBlock {
    pub id: WordBlockId,
    pub value_type: FieldType,
    pub value: String,
    /// Inventory tab this block was taken from, if any.
    pub filter_group: Option<FilterGroupId>,
}

impl WordBlock {
    pub fn new(id: WordBlockId, value_type: FieldType, value: impl Into<String>) -> Self {
        Self {
            id,
            value_type,
            value: value.into(),
            filter_group: None,
        }
    }

    #[must_use]
    pub fn with_filter_group(mut self, group: FilterGroupId) -> Self {
        self.filter_group = Some(group);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(FieldType::Id.to_string(), "ID");
        assert_eq!(FieldType::AnyText.label(), "Text");
        assert_eq!(FieldType::ALL.len(), 5);
    }

    #[test]
    fn test_block_builder() {
        let block = WordBlock::new(WordBlockId::new(4), FieldType::Date, "1999-01-01")
            .with_filter_group(FilterGroupId::new(2));

        assert_eq!(block.value, "1999-01-01");
        assert_eq!(block.filter_group, Some(FilterGroupId::new(2)));
    }
}
