//! Form definitions - static form data.
//!
//! A `FormDefinition` is the template a live [`Form`](super::Form) is
//! created from: its ordered content (titles, text, fill slots), an
//! optional timer, whether the correct move is to discard it, and the
//! rewards applied when it is received or resolved.

use serde::{Deserialize, Serialize};

use super::block::FieldType;
use crate::core::FormId;
use crate::rewards::{FormReward, FormRewards, RewardTiming};

/// A slot the player fills with a word block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillSlotSpec {
    pub required_type: FieldType,
    #[serde(default)]
    pub placeholder: String,
}

impl FillSlotSpec {
    pub fn new(required_type: FieldType) -> Self {
        Self {
            required_type,
            placeholder: String::new(),
        }
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

/// Kind of a content entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    Title,
    H1,
    H2,
    H3,
    Text,
    FillSlot,
}

/// One entry of a form's content, in reading order.
///
/// Text kinds carry `text`; `FillSlot` entries carry `slot`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentField {
    pub kind: ContentKind,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub slot: Option<FillSlotSpec>,
}

impl ContentField {
    fn text_of(kind: ContentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            slot: None,
        }
    }

    pub fn title(text: impl Into<String>) -> Self {
        Self::text_of(ContentKind::Title, text)
    }

    pub fn h1(text: impl Into<String>) -> Self {
        Self::text_of(ContentKind::H1, text)
    }

    pub fn h2(text: impl Into<String>) -> Self {
        Self::text_of(ContentKind::H2, text)
    }

    pub fn h3(text: impl Into<String>) -> Self {
        Self::text_of(ContentKind::H3, text)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::text_of(ContentKind::Text, text)
    }

    pub fn slot(spec: FillSlotSpec) -> Self {
        Self {
            kind: ContentKind::FillSlot,
            text: String::new(),
            slot: Some(spec),
        }
    }
}

/// Static form definition.
///
/// ## Example
///
/// ```
/// use form_desk::core::FormId;
/// use form_desk::forms::{ContentField, FieldType, FillSlotSpec, FormDefinition};
///
/// let permit = FormDefinition::new(FormId::new(1), "permit")
///     .with_content(ContentField::title("Parking Permit"))
///     .with_content(ContentField::slot(FillSlotSpec::new(FieldType::Name)))
///     .with_content(ContentField::slot(FillSlotSpec::new(FieldType::Address)))
///     .with_time_limit(30.0);
///
/// assert_eq!(permit.slot_count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub id: FormId,

    /// Host-side item identifier (for sprites and lookups).
    pub item_id: String,

    pub content: Vec<ContentField>,

    /// Seconds the player has before the form expires. `None` never expires.
    #[serde(default)]
    pub time_limit_secs: Option<f32>,

    /// The correct handling of this form is to discard it.
    #[serde(default)]
    pub should_be_discarded: bool,

    #[serde(default)]
    pub rewards: FormRewards,
}

impl FormDefinition {
    #[must_use]
    pub fn new(id: FormId, item_id: impl Into<String>) -> Self {
        Self {
            id,
            item_id: item_id.into(),
            content: Vec::new(),
            time_limit_secs: None,
            should_be_discarded: false,
            rewards: FormRewards::default(),
        }
    }

    #[must_use]
    pub fn with_content(mut self, field: ContentField) -> Self {
        self.content.push(field);
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, secs: f32) -> Self {
        self.time_limit_secs = Some(secs);
        self
    }

    #[must_use]
    pub fn to_be_discarded(mut self) -> Self {
        self.should_be_discarded = true;
        self
    }

    #[must_use]
    pub fn with_reward(mut self, timing: RewardTiming, reward: FormReward) -> Self {
        self.rewards.push(timing, reward);
        self
    }

    /// Fill slot specs in content order.
    pub fn slot_specs(&self) -> impl Iterator<Item = &FillSlotSpec> {
        self.content.iter().filter_map(|c| c.slot.as_ref())
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slot_specs().count()
    }

    /// The first title line, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|c| c.kind == ContentKind::Title)
            .map(|c| c.text.as_str())
    }
}
