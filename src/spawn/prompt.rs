//! Prompts and the runtime definitions built from them.
//!
//! A prompt is the lightweight authoring format of the Alpha mode: a
//! title, an instruction line, one required slot and a timer. The factory
//! turns it into a full [`FormDefinition`] on demand.

use serde::{Deserialize, Serialize};

use crate::core::FormId;
use crate::forms::{ContentField, FillSlotSpec, FormDefinition};

const DEFAULT_FALLBACK_TITLE: &str = "Alpha Form";
const DEFAULT_PROMPT_TEXT: &str = "Fill in the required field.";

/// A single-slot prompt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PromptSpec {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub prompt_text: String,
    /// Prompts without a slot cannot be turned into forms.
    #[serde(default)]
    pub required_slot: Option<FillSlotSpec>,
    /// Seconds to complete. Zero or less means untimed.
    #[serde(default)]
    pub time_limit_secs: f32,
}

impl PromptSpec {
    pub fn new(title: impl Into<String>, prompt_text: impl Into<String>, slot: FillSlotSpec) -> Self {
        Self {
            title: title.into(),
            prompt_text: prompt_text.into(),
            required_slot: Some(slot),
            time_limit_secs: 0.0,
        }
    }

    #[must_use]
    pub fn with_time_limit(mut self, secs: f32) -> Self {
        self.time_limit_secs = secs;
        self
    }
}

/// An authored list of prompts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptLibrary {
    pub prompts: Vec<PromptSpec>,
}

impl PromptLibrary {
    pub fn new(prompts: Vec<PromptSpec>) -> Self {
        Self { prompts }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prompts.len()
    }
}

/// Builds runtime form definitions from prompts.
#[derive(Clone, Debug)]
pub struct PromptFormFactory {
    fallback_title: String,
}

impl Default for PromptFormFactory {
    fn default() -> Self {
        Self {
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
        }
    }
}

impl PromptFormFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = title.into();
        self
    }

    /// Build a Title / Text / FillSlot definition.
    ///
    /// The returned definition carries a placeholder id; register it with
    /// [`FormRegistry::register_auto`](crate::forms::FormRegistry::register_auto).
    #[must_use]
    pub fn create(&self, spec: &PromptSpec) -> Option<FormDefinition> {
        let slot = spec.required_slot.clone()?;

        let title = if spec.title.trim().is_empty() {
            self.fallback_title.clone()
        } else {
            spec.title.clone()
        };
        let text = if spec.prompt_text.trim().is_empty() {
            DEFAULT_PROMPT_TEXT.to_string()
        } else {
            spec.prompt_text.clone()
        };

        let mut def = FormDefinition::new(FormId::new(0), "prompt")
            .with_content(ContentField::title(title))
            .with_content(ContentField::text(text))
            .with_content(ContentField::slot(slot));
        if spec.time_limit_secs > 0.0 {
            def = def.with_time_limit(spec.time_limit_secs);
        }
        Some(def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{ContentKind, FieldType};

    #[test]
    fn test_create_layout() {
        let spec = PromptSpec::new("Visa", "Who is travelling?", FillSlotSpec::new(FieldType::Name))
            .with_time_limit(15.0);
        let def = PromptFormFactory::new().create(&spec).unwrap();

        let kinds: Vec<_> = def.content.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ContentKind::Title, ContentKind::Text, ContentKind::FillSlot]);
        assert_eq!(def.title(), Some("Visa"));
        assert_eq!(def.time_limit_secs, Some(15.0));
        assert!(!def.should_be_discarded);
        assert!(def.rewards.is_empty());
    }

    #[test]
    fn test_blank_fallbacks() {
        let spec = PromptSpec::new("  ", "", FillSlotSpec::new(FieldType::Id));
        let def = PromptFormFactory::new().create(&spec).unwrap();

        assert_eq!(def.content[0].text, "Alpha Form");
        assert_eq!(def.content[1].text, "Fill in the required field.");
        assert_eq!(def.time_limit_secs, None);

        let custom = PromptFormFactory::new().with_fallback_title("Memo");
        assert_eq!(custom.create(&spec).unwrap().title(), Some("Memo"));
    }

    #[test]
    fn test_missing_slot() {
        let spec = PromptSpec {
            title: "Broken".into(),
            prompt_text: String::new(),
            required_slot: None,
            time_limit_secs: 5.0,
        };
        assert!(PromptFormFactory::new().create(&spec).is_none());
    }
}
