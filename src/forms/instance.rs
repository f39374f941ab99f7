//! Live forms on the desk.
//!
//! A `Form` is created from a [`FormDefinition`] when it arrives. It owns
//! the word blocks placed in its slots and its own timer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::block::{FieldType, WordBlock};
use super::definition::{FillSlotSpec, FormDefinition};
use crate::core::{FormDeskError, FormId, FormInstanceId, Result};

/// A fill slot and whatever is currently in it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotState {
    pub spec: FillSlotSpec,
    pub block: Option<WordBlock>,
}

impl SlotState {
    /// True when a block of the required type sits in the slot.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.block
            .as_ref()
            .is_some_and(|b| b.value_type == self.spec.required_type)
    }
}

/// Outcome of checking every slot of a form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub correct_fields: u32,
    pub incorrect_or_empty_fields: u32,
}

impl ValidationResult {
    /// A form is valid when no slot is wrong or empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.incorrect_or_empty_fields == 0
    }

    #[must_use]
    pub fn total_fields(&self) -> u32 {
        self.correct_fields + self.incorrect_or_empty_fields
    }
}

/// A form instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub instance_id: FormInstanceId,
    pub form_id: FormId,
    pub should_be_discarded: bool,
    slots: Vec<SlotState>,
    elapsed: f32,
    time_limit: Option<f32>,
}

impl Form {
    /// Instantiate a definition. Slots come out empty, in content order.
    #[must_use]
    pub fn from_definition(instance_id: FormInstanceId, definition: &FormDefinition) -> Self {
        Self {
            instance_id,
            form_id: definition.id,
            should_be_discarded: definition.should_be_discarded,
            slots: definition
                .slot_specs()
                .map(|spec| SlotState {
                    spec: spec.clone(),
                    block: None,
                })
                .collect(),
            elapsed: 0.0,
            time_limit: definition.time_limit_secs,
        }
    }

    #[must_use]
    pub fn slots(&self) -> &[SlotState] {
        &self.slots
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut SlotState> {
        let len = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(FormDeskError::SlotOutOfRange { index, len })
    }

    /// Drop a block into a slot.
    ///
    /// Any block is accepted; types are only checked on validation. The
    /// block previously in the slot, if any, is handed back.
    pub fn place(&mut self, index: usize, block: WordBlock) -> Result<Option<WordBlock>> {
        Ok(self.slot_mut(index)?.block.replace(block))
    }

    /// Take the block out of a slot.
    pub fn detach(&mut self, index: usize) -> Result<Option<WordBlock>> {
        Ok(self.slot_mut(index)?.block.take())
    }

    /// Take every block out of the form (used when a form leaves the desk).
    pub fn take_blocks(&mut self) -> Vec<WordBlock> {
        self.slots.iter_mut().filter_map(|s| s.block.take()).collect()
    }

    /// Filled values keyed by the placed block's type.
    ///
    /// When two slots hold blocks of the same type the later slot wins.
    #[must_use]
    pub fn form_data(&self) -> BTreeMap<FieldType, String> {
        self.slots
            .iter()
            .filter_map(|s| s.block.as_ref())
            .map(|b| (b.value_type, b.value.clone()))
            .collect()
    }

    /// Check every slot.
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        let correct = self.slots.iter().filter(|s| s.is_correct()).count() as u32;
        ValidationResult {
            correct_fields: correct,
            incorrect_or_empty_fields: self.slots.len() as u32 - correct,
        }
    }

    // === Timer ===

    /// Advance the form's timer.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[must_use]
    pub fn time_limit(&self) -> Option<f32> {
        self.time_limit
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.time_limit.is_some_and(|limit| self.elapsed >= limit)
    }

    /// Fraction of the timer left, in `[0, 1]`. Untimed forms report 0.
    #[must_use]
    pub fn remaining_time_normalized(&self) -> f32 {
        match self.time_limit {
            Some(limit) if limit > 0.0 => (1.0 - self.elapsed / limit).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WordBlockId;
    use crate::forms::ContentField;

    fn definition() -> FormDefinition {
        FormDefinition::new(FormId::new(1), "permit")
            .with_content(ContentField::title("Permit"))
            .with_content(ContentField::slot(FillSlotSpec::new(FieldType::Name)))
            .with_content(ContentField::slot(FillSlotSpec::new(FieldType::Id)))
            .with_time_limit(10.0)
    }

    fn block(id: u32, ty: FieldType, value: &str) -> WordBlock {
        WordBlock::new(WordBlockId::new(id), ty, value)
    }

    #[test]
    fn test_instantiate() {
        let form = Form::from_definition(FormInstanceId::new(0), &definition());
        assert_eq!(form.slots().len(), 2);
        assert!(form.slots().iter().all(|s| s.block.is_none()));
        assert_eq!(form.time_limit(), Some(10.0));
    }

    #[test]
    fn test_empty_form_invalid_fields() {
        let form = Form::from_definition(FormInstanceId::new(0), &definition());
        let result = form.validate();
        assert_eq!(result.correct_fields, 0);
        assert_eq!(result.incorrect_or_empty_fields, 2);
        assert!(!result.is_valid());
    }

    #[test]
    fn test_place_and_validate() {
        let mut form = Form::from_definition(FormInstanceId::new(0), &definition());
        form.place(0, block(1, FieldType::Name, "Ada")).unwrap();
        form.place(1, block(2, FieldType::Date, "today")).unwrap();

        let result = form.validate();
        assert_eq!(result.correct_fields, 1);
        assert_eq!(result.incorrect_or_empty_fields, 1);

        let displaced = form.place(1, block(3, FieldType::Id, "A-113")).unwrap();
        assert_eq!(displaced.map(|b| b.id), Some(WordBlockId::new(2)));
        assert!(form.validate().is_valid());
        assert_eq!(form.validate().total_fields(), 2);
    }

    #[test]
    fn test_slot_out_of_range() {
        let mut form = Form::from_definition(FormInstanceId::new(0), &definition());
        assert_eq!(
            form.place(5, block(1, FieldType::Name, "x")),
            Err(FormDeskError::SlotOutOfRange { index: 5, len: 2 })
        );
        assert!(form.detach(9).is_err());
    }

    #[test]
    fn test_detach() {
        let mut form = Form::from_definition(FormInstanceId::new(0), &definition());
        form.place(0, block(1, FieldType::Name, "Ada")).unwrap();
        assert!(form.detach(0).unwrap().is_some());
        assert!(form.detach(0).unwrap().is_none());
    }

    #[test]
    fn test_form_data_last_wins() {
        let mut form = Form::from_definition(FormInstanceId::new(0), &definition());
        form.place(0, block(1, FieldType::Name, "Ada")).unwrap();
        form.place(1, block(2, FieldType::Name, "Grace")).unwrap();

        let data = form.form_data();
        assert_eq!(data.len(), 1);
        assert_eq!(data[&FieldType::Name], "Grace");
    }

    #[test]
    fn test_form_without_slots_is_valid() {
        let def = FormDefinition::new(FormId::new(2), "notice")
            .with_content(ContentField::text("Nothing to fill"));
        let form = Form::from_definition(FormInstanceId::new(1), &def);
        assert!(form.validate().is_valid());
    }

    #[test]
    fn test_timer() {
        let mut form = Form::from_definition(FormInstanceId::new(0), &definition());
        assert_eq!(form.remaining_time_normalized(), 1.0);

        form.advance(2.5);
        assert!((form.remaining_time_normalized() - 0.75).abs() < 1e-6);
        assert!(!form.is_expired());

        form.advance(-4.0);
        assert_eq!(form.elapsed(), 2.5);

        form.advance(7.5);
        assert!(form.is_expired());
        assert_eq!(form.remaining_time_normalized(), 0.0);
    }

    #[test]
    fn test_untimed_form() {
        let def = FormDefinition::new(FormId::new(3), "untimed")
            .with_content(ContentField::slot(FillSlotSpec::new(FieldType::AnyText)));
        let mut form = Form::from_definition(FormInstanceId::new(0), &def);
        form.advance(1000.0);
        assert!(!form.is_expired());
        assert_eq!(form.remaining_time_normalized(), 0.0);
    }

    #[test]
    fn test_take_blocks() {
        let mut form = Form::from_definition(FormInstanceId::new(0), &definition());
        form.place(0, block(1, FieldType::Name, "Ada")).unwrap();
        let blocks = form.take_blocks();
        assert_eq!(blocks.len(), 1);
        assert!(form.slots().iter().all(|s| s.block.is_none()));
    }
}
