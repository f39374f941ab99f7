//! Property tests for the score formula, arrival pacing and the prompt cycle.

use form_desk::core::{ArrivalConfig, FormId, FormInstanceId, GameRng, ScoreConfig};
use form_desk::forms::{
    ContentField, FieldType, FillSlotSpec, Form, FormDefinition, FormRegistry, ValidationResult,
};
use form_desk::scoring::ScoreService;
use form_desk::spawn::{FormSpawnSource, PromptLibrary, PromptSpawnSource, PromptSpec};
use proptest::prelude::*;

fn validation(correct: u32, incorrect: u32) -> ValidationResult {
    ValidationResult {
        correct_fields: correct,
        incorrect_or_empty_fields: incorrect,
    }
}

proptest! {
    #[test]
    fn prop_clamped_score_never_negative(
        outcomes in prop::collection::vec((any::<bool>(), 0u32..5, 0u32..5, 0.0f32..=1.0), 1..40)
    ) {
        let mut service = ScoreService::new(ScoreConfig::default());
        for (success, correct, incorrect, pressure) in outcomes {
            let change = service.apply_submission(success, None, &validation(correct, incorrect), pressure);
            prop_assert!(change.score >= 0);
            prop_assert_eq!(change.score, service.current());
        }
    }

    #[test]
    fn prop_unclamped_delta_matches_formula(
        success in any::<bool>(),
        correct in 0u32..6,
        incorrect in 0u32..6,
    ) {
        let config = ScoreConfig { clamp_to_zero: false, ..ScoreConfig::default() };
        let mut service = ScoreService::new(config);
        let change = service.apply_submission(success, None, &validation(correct, incorrect), 0.0);

        let expected = if success {
            100 + 25 * i64::from(correct)
        } else {
            -(100 + 25 * i64::from(incorrect))
        };
        prop_assert_eq!(change.delta, expected);
    }

    #[test]
    fn prop_success_bonus_bounded(
        pressure in 0.0f32..=1.0,
        elapsed in 0.0f32..20.0,
    ) {
        let def = FormDefinition::new(FormId::new(1), "timed")
            .with_content(ContentField::slot(FillSlotSpec::new(FieldType::Name)))
            .with_time_limit(20.0);
        let mut form = Form::from_definition(FormInstanceId::new(0), &def);
        form.advance(elapsed);

        let service = ScoreService::new(ScoreConfig::default());
        let delta = service.delta_for(true, Some(&form), &validation(1, 0), pressure);
        prop_assert!((125..=125 + 60 + 50).contains(&delta));
    }

    #[test]
    fn prop_delay_monotonic_and_clamped(
        initial in 1.0f32..30.0,
        min_frac in 0.05f32..1.0,
        step in 0.0f32..5.0,
        successes in 0u32..200,
    ) {
        let arrival = ArrivalConfig {
            initial_delay_secs: initial,
            min_delay_secs: initial * min_frac,
            delay_step_secs: step,
        };
        let now = arrival.delay_after(successes);
        let next = arrival.delay_after(successes + 1);

        prop_assert!(next <= now);
        prop_assert!(now >= arrival.min_delay_secs && now <= arrival.initial_delay_secs);

        let pressure = arrival.pressure_at(now);
        prop_assert!((0.0..=1.0).contains(&pressure));
    }

    #[test]
    fn prop_prompt_cycle_is_permutation(count in 1usize..20, seed in any::<u64>()) {
        let prompts = (0..count)
            .map(|i| PromptSpec::new(format!("P{i:02}"), "", FillSlotSpec::new(FieldType::AnyText)))
            .collect();
        let mut source = PromptSpawnSource::new(PromptLibrary::new(prompts));
        let mut registry = FormRegistry::new();
        source.initialize(&GameRng::new(seed));

        for _ in 0..2 {
            let ids: Vec<_> = (0..count)
                .filter_map(|_| source.next_form(&mut registry))
                .collect();
            let mut cycle: Vec<String> = ids
                .into_iter()
                .filter_map(|id| registry.get(id).and_then(|d| d.title()).map(str::to_string))
                .collect();
            cycle.sort();
            let expected: Vec<String> = (0..count).map(|i| format!("P{i:02}")).collect();
            prop_assert_eq!(cycle, expected);
        }
    }
}
