//! Alpha game setup.

use crate::core::{FilterGroupId, Result, SessionConfig, WordBlockDefId};
use crate::forms::{FieldType, FillSlotSpec};
use crate::inventory::{FilterGroup, WordBlockDefinition};
use crate::manager::FormManager;
use crate::scoring::ScoreSession;
use crate::spawn::{PromptLibrary, PromptSpawnSource, PromptSpec};

/// Seconds a built-in prompt stays on the desk.
const PROMPT_TIME_LIMIT: f32 = 30.0;

/// Built-in prompts. Every field type is asked for at least once.
#[must_use]
pub fn default_prompts() -> Vec<PromptSpec> {
    let prompt = |title: &str, text: &str, field: FieldType, placeholder: &str| {
        PromptSpec::new(title, text, FillSlotSpec::new(field).with_placeholder(placeholder))
            .with_time_limit(PROMPT_TIME_LIMIT)
    };

    vec![
        prompt("Visitor Log", "Who is signing in today?", FieldType::Name, "Full name"),
        prompt("Badge Request", "Enter the applicant's badge number.", FieldType::Id, "Badge ID"),
        prompt("Leave Request", "When does the leave begin?", FieldType::Date, "Start date"),
        prompt("Change of Address", "Where should mail be forwarded?", FieldType::Address, "New address"),
        prompt("Complaint Form", "Describe the issue in a few words.", FieldType::AnyText, "Details"),
        prompt("Parcel Pickup", "Name of the recipient.", FieldType::Name, "Recipient"),
        prompt("Records Lookup", "Which case file is requested?", FieldType::Id, "Case number"),
        prompt("Appointment Slip", "Pick a date for the appointment.", FieldType::Date, "Date"),
    ]
}

/// One unlocked block per field type, split into "People" and "Records" tabs.
#[must_use]
pub fn starter_blocks() -> Vec<WordBlockDefinition> {
    let people = FilterGroup::new(FilterGroupId::new(0), "People");
    let records = FilterGroup::new(FilterGroupId::new(1), "Records");

    vec![
        WordBlockDefinition::new(WordBlockDefId::new(0), FieldType::Name, "J. Doe").in_group(people.clone()),
        WordBlockDefinition::new(WordBlockDefId::new(1), FieldType::Address, "12 Elm Street").in_group(people),
        WordBlockDefinition::new(WordBlockDefId::new(2), FieldType::Id, "A-1042").in_group(records.clone()),
        WordBlockDefinition::new(WordBlockDefId::new(3), FieldType::Date, "03/14").in_group(records.clone()),
        WordBlockDefinition::new(WordBlockDefId::new(4), FieldType::AnyText, "Approved").in_group(records),
    ]
}

/// Builder for an Alpha session.
pub struct AlphaGameBuilder {
    config: SessionConfig,
    prompts: Option<Vec<PromptSpec>>,
    session: Option<ScoreSession>,
}

impl Default for AlphaGameBuilder {
    fn default() -> Self {
        Self {
            config: SessionConfig::default(),
            prompts: None,
            session: None,
        }
    }
}

impl AlphaGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Replace the whole configuration. Call before `seed`.
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Use these prompts instead of [`default_prompts`].
    pub fn prompts(mut self, prompts: Vec<PromptSpec>) -> Self {
        self.prompts = Some(prompts);
        self
    }

    /// Continue a score session from an earlier run (keeps the best score).
    pub fn score_session(mut self, session: ScoreSession) -> Self {
        self.session = Some(session);
        self
    }

    /// Build and start the session.
    pub fn build(self) -> Result<FormManager> {
        let library = PromptLibrary::new(self.prompts.unwrap_or_default());
        let source = PromptSpawnSource::new(library)
            .with_fallback(default_prompts())
            .with_initial_spawn_count(self.config.initial_spawn_count)
            .with_loop(self.config.loop_prompts);

        let mut manager = FormManager::new(self.config)?
            .with_word_blocks(starter_blocks())
            .with_source(Box::new(source));
        if let Some(session) = self.session {
            manager = manager.with_score_session(session);
        }

        manager.start()?;
        Ok(manager)
    }
}
