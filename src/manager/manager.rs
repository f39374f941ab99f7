//! The form lifecycle engine.
//!
//! `FormManager` owns everything a run needs: the game state (flags and
//! counters), form definitions and groups, the desk of live forms, the
//! incoming queue, the inventory, the score, and an optional spawn source.
//!
//! ## Lifecycle
//!
//! 1. Groups whose flag condition holds are unlocked and their forms queued.
//! 2. [`FormManager::start`] puts the first forms on the desk.
//! 3. [`FormManager::tick`] runs timers: forms expire, and every
//!    [`GameState::arrival_delay`] seconds the next form arrives (queued
//!    group forms first, then the spawn source).
//! 4. The player fills slots and submits or discards forms. Each
//!    resolution is scored, applies rewards, and may flip flags, which
//!    re-evaluates group unlocks.
//! 5. The run is lost after too many failures or when the desk overflows.
//!
//! ## Example
//!
//! ```
//! use form_desk::core::{FormId, SessionConfig};
//! use form_desk::forms::{ContentField, FieldType, FillSlotSpec, FormDefinition, FormGroup};
//! use form_desk::manager::{FormEvent, FormManager};
//!
//! let permit = FormDefinition::new(FormId::new(1), "permit")
//!     .with_content(ContentField::slot(FillSlotSpec::new(FieldType::Name)));
//!
//! let mut manager = FormManager::new(SessionConfig::default())
//!     .unwrap()
//!     .with_definition(permit)
//!     .with_group(FormGroup::new("starter").with_form(FormId::new(1)));
//!
//! manager.start().unwrap();
//! assert_eq!(manager.active_count(), 1);
//! assert!(manager
//!     .drain_events()
//!     .iter()
//!     .any(|e| matches!(e, FormEvent::GroupUnlocked { .. })));
//! ```

use std::collections::{BTreeMap, VecDeque};

use rustc_hash::FxHashSet;

use super::events::{FailureReason, FormEvent, LoseReason, Resolution, ResolutionKind};
use crate::core::{
    Flag, FlagId, FormDeskError, FormId, FormInstanceId, GameRng, GameState, GameStateSnapshot,
    IdAllocator, Result, SessionConfig, WordBlockDefId, WordBlockId,
};
use crate::forms::{Form, FormDefinition, FormGroup, FormRegistry, ValidationResult, WordBlock};
use crate::inventory::{InventoryCatalog, WordBlockDefinition};
use crate::rewards::{RewardContext, RewardResolver, RewardResult, RewardTiming};
use crate::scoring::{ScoreChange, ScoreService, ScoreSession};
use crate::spawn::FormSpawnSource;

/// Most forms a single [`FormManager::tick`] brings onto the desk.
pub const MAX_ARRIVALS_PER_TICK: usize = 64;

/// Form lifecycle manager.
pub struct FormManager {
    config: SessionConfig,
    registry: FormRegistry,
    groups: Vec<FormGroup>,
    state: GameState,
    inventory: InventoryCatalog,
    starting_blocks: Vec<WordBlockDefinition>,
    score: ScoreService,
    source: Option<Box<dyn FormSpawnSource>>,
    rng: GameRng,

    incoming: VecDeque<FormId>,
    submitted: Vec<FormId>,
    failed: FxHashSet<FormId>,
    unlocked_groups: FxHashSet<usize>,
    active: BTreeMap<FormInstanceId, Form>,
    instance_ids: IdAllocator,

    spawn_timer: f32,
    started: bool,
    lost: Option<LoseReason>,
    start_snapshot: Option<GameStateSnapshot>,
    events: Vec<FormEvent>,
}

impl FormManager {
    /// Create a manager. Fails if the configuration does not validate.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            registry: FormRegistry::new(),
            groups: Vec::new(),
            state: GameState::new(config.arrival.clone()),
            inventory: InventoryCatalog::new(),
            starting_blocks: Vec::new(),
            score: ScoreService::new(config.score.clone()),
            source: None,
            rng: GameRng::new(config.seed),
            incoming: VecDeque::new(),
            submitted: Vec::new(),
            failed: FxHashSet::default(),
            unlocked_groups: FxHashSet::default(),
            active: BTreeMap::new(),
            instance_ids: IdAllocator::default(),
            spawn_timer: 0.0,
            started: false,
            lost: None,
            start_snapshot: None,
            events: Vec::new(),
            config,
        })
    }

    // === Setup ===

    #[must_use]
    pub fn with_definition(mut self, definition: FormDefinition) -> Self {
        self.registry.register(definition);
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: FormGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Register a flag with its start-of-run state.
    #[must_use]
    pub fn with_flag(mut self, flag: Flag, initial_state: bool) -> Self {
        self.state.flags.register(flag, initial_state, true);
        self
    }

    /// Word block definitions the inventory is built from at start.
    #[must_use]
    pub fn with_word_blocks(mut self, definitions: Vec<WordBlockDefinition>) -> Self {
        self.starting_blocks = definitions;
        self
    }

    #[must_use]
    pub fn with_inventory(mut self, inventory: InventoryCatalog) -> Self {
        self.inventory = inventory;
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: Box<dyn FormSpawnSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Carry a score session over from an earlier manager.
    #[must_use]
    pub fn with_score_session(mut self, session: ScoreSession) -> Self {
        self.score = ScoreService::new(self.config.score.clone()).with_session(session);
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn registry(&self) -> &FormRegistry {
        &self.registry
    }

    #[must_use]
    pub fn groups(&self) -> &[FormGroup] {
        &self.groups
    }

    #[must_use]
    pub fn inventory(&self) -> &InventoryCatalog {
        &self.inventory
    }

    /// Inventory access for tab selection.
    pub fn inventory_mut(&mut self) -> &mut InventoryCatalog {
        &mut self.inventory
    }

    #[must_use]
    pub fn score(&self) -> &ScoreService {
        &self.score
    }

    /// Forms waiting to arrive, in arrival order.
    pub fn incoming(&self) -> impl Iterator<Item = FormId> + '_ {
        self.incoming.iter().copied()
    }

    /// Registered definitions resolved successfully, in resolution order.
    ///
    /// Runtime definitions dropped by the spawn source are not tracked.
    #[must_use]
    pub fn submitted(&self) -> &[FormId] {
        &self.submitted
    }

    /// Names of groups unlocked so far in this run.
    pub fn unlocked_groups(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .enumerate()
            .filter(|(i, _)| self.unlocked_groups.contains(i))
            .map(|(_, g)| g.name.as_str())
    }

    /// Live forms, oldest first.
    pub fn active_forms(&self) -> impl Iterator<Item = &Form> {
        self.active.values()
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn form(&self, instance: FormInstanceId) -> Option<&Form> {
        self.active.get(&instance)
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.lost.is_some()
    }

    #[must_use]
    pub fn lose_reason(&self) -> Option<LoseReason> {
        self.lost
    }

    /// Seconds until the next arrival at the current pace.
    #[must_use]
    pub fn time_until_next_form(&self) -> f32 {
        (self.state.arrival_delay() - self.spawn_timer).max(0.0)
    }

    /// Take all queued events.
    pub fn drain_events(&mut self) -> Vec<FormEvent> {
        std::mem::take(&mut self.events)
    }

    // === Flags and groups ===

    /// Set a flag from the host. Returns `true` if it changed.
    pub fn set_flag(&mut self, flag: FlagId, state: bool) -> bool {
        let changed = self.state.flags.set(flag, state);
        self.process_flag_changes();
        changed
    }

    /// Set a flag by name from the host. Returns `true` if it changed.
    pub fn set_flag_by_name(&mut self, name: &str, state: bool) -> bool {
        let changed = self.state.flags.set_by_name(name, state);
        self.process_flag_changes();
        changed
    }

    /// Re-evaluate every group against the current flags.
    ///
    /// Unlocked groups queue their forms; locked groups pull their
    /// not-yet-submitted forms out of the queue. Forms already on the desk
    /// stay there.
    pub fn update_availability(&mut self) {
        for index in 0..self.groups.len() {
            if self.groups[index].is_unlocked(&self.state.flags) {
                self.ensure_group_unlocked(index);
            } else {
                self.disable_group(index);
            }
        }
    }

    fn ensure_group_unlocked(&mut self, index: usize) {
        if self.unlocked_groups.insert(index) {
            let name = self.groups[index].name.clone();
            tracing::debug!(group = %name, "form group unlocked");
            self.events.push(FormEvent::GroupUnlocked { group: name });
        }

        let forms = self.groups[index].forms.clone();
        for form in forms {
            self.queue_incoming(form);
        }
    }

    fn disable_group(&mut self, index: usize) {
        let group = &self.groups[index];
        let submitted = &self.submitted;
        self.incoming
            .retain(|id| !group.forms.contains(id) || submitted.contains(id));
    }

    /// Queue a definition for arrival.
    ///
    /// Ignored (returns `false`) when the definition is unknown, already
    /// resolved, already queued, or currently on the desk.
    pub fn queue_incoming(&mut self, form: FormId) -> bool {
        if !self.registry.contains(form) {
            tracing::warn!(%form, "cannot queue unregistered form");
            return false;
        }
        if self.submitted.contains(&form)
            || self.failed.contains(&form)
            || self.incoming.contains(&form)
            || self.active.values().any(|f| f.form_id == form)
        {
            return false;
        }
        self.incoming.push_back(form);
        true
    }

    fn process_flag_changes(&mut self) {
        let changes = self.state.flags.take_changes();
        if changes.is_empty() {
            return;
        }
        for (flag, state) in changes {
            self.events.push(FormEvent::FlagChanged { flag, state });
        }
        if self.config.listen_for_flag_changes {
            self.update_availability();
        }
    }

    // === Run control ===

    /// Start the run.
    ///
    /// Unlocks groups, builds the inventory, then spawns the spawn source's
    /// initial forms. Only without a source, or if it yields nothing, do up
    /// to `initial_spawn_count` queued forms arrive instead. Starting twice
    /// is a no-op.
    pub fn start(&mut self) -> Result<()> {
        if self.lost.is_some() {
            return Err(FormDeskError::GameOver);
        }
        if self.started {
            return Ok(());
        }

        self.start_snapshot = Some(self.state.snapshot());
        self.inventory.build_initial(&self.starting_blocks);
        if let Some(source) = self.source.as_mut() {
            source.initialize(&self.rng);
        }
        self.started = true;
        tracing::debug!(seed = self.config.seed, "run started");

        self.update_availability();

        let initial = match self.source.as_mut() {
            Some(source) => source.initial_forms(&mut self.registry),
            None => Vec::new(),
        };
        if !initial.is_empty() {
            for form in initial {
                if self.lost.is_some() {
                    break;
                }
                self.spawn(form);
            }
            return Ok(());
        }

        let mut spawned = 0;
        while spawned < self.config.initial_spawn_count && self.lost.is_none() {
            let Some(form) = self.incoming.pop_front() else {
                break;
            };
            if self.spawn(form).is_some() {
                spawned += 1;
            }
        }

        Ok(())
    }

    /// Advance timers by `dt` seconds.
    ///
    /// Expired forms resolve as failures, then one form arrives for every
    /// full arrival delay on the spawn timer, at most
    /// [`MAX_ARRIVALS_PER_TICK`] per call. Does nothing before
    /// [`FormManager::start`] or after the run is lost.
    pub fn tick(&mut self, dt: f32) {
        if !self.started || self.lost.is_some() {
            return;
        }
        if !dt.is_finite() {
            tracing::warn!(dt, "ignoring non-finite tick");
            return;
        }
        let dt = dt.max(0.0);

        for form in self.active.values_mut() {
            form.advance(dt);
        }
        let expired: Vec<FormInstanceId> = self
            .active
            .values()
            .filter(|f| f.is_expired())
            .map(|f| f.instance_id)
            .collect();
        for instance in expired {
            if self.lost.is_some() {
                return;
            }
            if let Err(err) = self.resolve(instance, ResolutionKind::Expired) {
                tracing::warn!(%instance, %err, "failed to expire form");
            }
        }

        self.spawn_timer += dt;
        let mut arrivals = 0;
        while self.lost.is_none() {
            let delay = self.state.arrival_delay();
            if self.spawn_timer < delay {
                break;
            }
            if arrivals == MAX_ARRIVALS_PER_TICK {
                // drop the backlog, keep the phase
                self.spawn_timer %= delay;
                break;
            }
            self.spawn_timer -= delay;
            arrivals += 1;
            if !self.spawn_next() {
                self.spawn_timer = 0.0;
                break;
            }
        }
    }

    /// Bring the next form onto the desk right away.
    ///
    /// Queued group forms come first, then the spawn source. Returns
    /// `false` when nothing is available.
    pub fn spawn_next(&mut self) -> bool {
        if self.lost.is_some() {
            return false;
        }
        let next = match self.incoming.pop_front() {
            Some(form) => Some(form),
            None => self
                .source
                .as_mut()
                .and_then(|source| source.next_form(&mut self.registry)),
        };

        match next {
            Some(form) => self.spawn(form).is_some(),
            None => {
                tracing::debug!("no form available to spawn");
                false
            }
        }
    }

    /// Put a specific definition on the desk now, bypassing the queue.
    pub fn spawn_form(&mut self, form: FormId) -> Result<FormInstanceId> {
        if self.lost.is_some() {
            return Err(FormDeskError::GameOver);
        }
        self.incoming.retain(|id| *id != form);
        self.spawn(form).ok_or(FormDeskError::UnknownDefinition(form))
    }

    fn spawn(&mut self, form_id: FormId) -> Option<FormInstanceId> {
        let Some(definition) = self.registry.get(form_id) else {
            tracing::warn!(form = %form_id, "cannot spawn unregistered form");
            return None;
        };

        let instance = FormInstanceId::new(self.instance_ids.next_raw());
        let form = Form::from_definition(instance, definition);

        self.apply_rewards(form_id, RewardTiming::OnReceive, Some(&form));
        self.active.insert(instance, form);
        self.events.push(FormEvent::FormCreated {
            instance,
            form: form_id,
        });
        tracing::debug!(%instance, form = %form_id, active = self.active.len(), "form spawned");

        self.process_flag_changes();
        self.check_lose();
        Some(instance)
    }

    /// Start over with the start-of-run flags, an empty desk and zero score.
    ///
    /// The score session keeps the final score of the lost run.
    pub fn retry(&mut self) -> Result<()> {
        if let Some(snapshot) = self.start_snapshot.take() {
            self.state.restore(&snapshot);
        }

        let forms: Vec<FormId> = self.active.values().map(|f| f.form_id).collect();
        if let Some(source) = self.source.as_mut() {
            for form in forms {
                source.release(form, &mut self.registry);
            }
        }

        self.active.clear();
        self.incoming.clear();
        self.submitted.clear();
        self.failed.clear();
        self.unlocked_groups.clear();
        self.events.clear();
        self.spawn_timer = 0.0;
        self.lost = None;
        self.started = false;
        self.score.reset();

        tracing::debug!("run restarted");
        self.start()
    }

    // === Word blocks ===

    /// Take a fresh block of an unlocked inventory definition.
    pub fn take_word_block(&mut self, definition: WordBlockDefId) -> Option<WordBlock> {
        let block = self.inventory.spawn_block(definition)?;
        self.state.register_word_block(block.clone());
        Some(block)
    }

    /// Throw away a block the player holds (an invalid drop).
    pub fn return_word_block(&mut self, block: WordBlockId) -> bool {
        self.state.unregister_word_block(block).is_some()
    }

    /// Drop a block into a slot of a live form. Returns the displaced block.
    pub fn place_word_block(
        &mut self,
        instance: FormInstanceId,
        slot: usize,
        block: WordBlock,
    ) -> Result<Option<WordBlock>> {
        if self.lost.is_some() {
            return Err(FormDeskError::GameOver);
        }
        self.active
            .get_mut(&instance)
            .ok_or(FormDeskError::UnknownForm(instance))?
            .place(slot, block)
    }

    /// Take a block out of a slot of a live form.
    pub fn detach_word_block(&mut self, instance: FormInstanceId, slot: usize) -> Result<Option<WordBlock>> {
        self.active
            .get_mut(&instance)
            .ok_or(FormDeskError::UnknownForm(instance))?
            .detach(slot)
    }

    // === Resolution ===

    /// Submit a form.
    ///
    /// Succeeds when every slot holds a block of the right type and the
    /// form is not one that should have been discarded. The form leaves
    /// the desk either way.
    pub fn submit(&mut self, instance: FormInstanceId) -> Result<Resolution> {
        if self.lost.is_some() {
            return Err(FormDeskError::GameOver);
        }
        self.resolve(instance, ResolutionKind::Submitted)
    }

    /// Submit several forms in order (a full submit tray).
    pub fn submit_all(&mut self, instances: &[FormInstanceId]) -> Vec<Result<Resolution>> {
        instances.iter().map(|&id| self.submit(id)).collect()
    }

    /// Discard a form. Correct only for forms meant to be discarded.
    pub fn discard(&mut self, instance: FormInstanceId) -> Result<Resolution> {
        if self.lost.is_some() {
            return Err(FormDeskError::GameOver);
        }
        self.resolve(instance, ResolutionKind::Discarded)
    }

    fn resolve(&mut self, instance: FormInstanceId, kind: ResolutionKind) -> Result<Resolution> {
        let mut form = self
            .active
            .remove(&instance)
            .ok_or(FormDeskError::UnknownForm(instance))?;
        let form_id = form.form_id;
        let validation = form.validate();
        let data = form.form_data();
        let pressure = self.state.spawn_pressure();

        let failure = match kind {
            ResolutionKind::Submitted if form.should_be_discarded => {
                Some(FailureReason::ShouldHaveDiscarded)
            }
            ResolutionKind::Submitted if !validation.is_valid() => Some(FailureReason::InvalidFields),
            ResolutionKind::Submitted => None,
            ResolutionKind::Discarded if form.should_be_discarded => None,
            ResolutionKind::Discarded => Some(FailureReason::WronglyDiscarded),
            ResolutionKind::Expired => Some(FailureReason::Expired),
        };
        let success = failure.is_none();

        match kind {
            ResolutionKind::Submitted if success => self.state.record_success(),
            ResolutionKind::Submitted => self.state.record_failure(),
            ResolutionKind::Discarded => self.state.record_discard(success),
            ResolutionKind::Expired => self.state.record_expiry(),
        }

        // A correct discard earns the base and timing bonuses, not field points.
        let scored = if kind == ResolutionKind::Discarded && success {
            ValidationResult::default()
        } else {
            validation
        };
        let score = self
            .score
            .apply_submission(success, Some(&form), &scored, pressure);

        if success {
            self.incoming.retain(|id| *id != form_id);
        }

        let timing = if success {
            RewardTiming::OnSubmitSuccess
        } else {
            RewardTiming::OnSubmitFailure
        };
        let rewards = self.apply_rewards(form_id, timing, Some(&form));

        for block in form.take_blocks() {
            self.state.unregister_word_block(block.id);
        }
        if let Some(source) = self.source.as_mut() {
            source.release(form_id, &mut self.registry);
        }
        // released runtime definitions are never queued again
        if self.registry.contains(form_id) {
            if !success {
                self.failed.insert(form_id);
            } else if !self.submitted.contains(&form_id) {
                self.submitted.push(form_id);
            }
        }

        self.push_resolution_events(instance, form_id, kind, failure, score);
        self.process_flag_changes();
        self.check_lose();

        Ok(Resolution {
            instance,
            form: form_id,
            kind,
            success,
            failure,
            validation,
            data,
            score,
            rewards,
        })
    }

    fn push_resolution_events(
        &mut self,
        instance: FormInstanceId,
        form: FormId,
        kind: ResolutionKind,
        failure: Option<FailureReason>,
        score: ScoreChange,
    ) {
        let event = match (kind, failure) {
            (ResolutionKind::Discarded, failure) => FormEvent::FormDiscarded {
                instance,
                form,
                correct: failure.is_none(),
            },
            (_, Some(reason)) => FormEvent::FormFailed {
                instance,
                form,
                reason,
            },
            (_, None) => FormEvent::FormSubmitted { instance, form },
        };
        tracing::debug!(%instance, %form, ?kind, ?failure, score = score.score, "form resolved");
        self.events.push(event);
        self.events.push(FormEvent::ScoreChanged(score));
    }

    fn apply_rewards(
        &mut self,
        form_id: FormId,
        timing: RewardTiming,
        form: Option<&Form>,
    ) -> Vec<RewardResult> {
        let Some(definition) = self.registry.get(form_id) else {
            return Vec::new();
        };
        let mut ctx = RewardContext {
            state: &mut self.state,
            inventory: &mut self.inventory,
            definition,
            form,
        };
        RewardResolver::apply_all(definition.rewards.get(timing), &mut ctx)
    }

    fn check_lose(&mut self) {
        if self.lost.is_some() {
            return;
        }
        let lose = &self.config.lose;
        let failed = self.state.counters().failed;

        let reason = if lose.max_failures.is_some_and(|max| failed >= max) {
            Some(LoseReason::TooManyFailures)
        } else if lose.max_active_forms.is_some_and(|max| self.active.len() > max) {
            Some(LoseReason::DeskOverflow)
        } else {
            None
        };

        if let Some(reason) = reason {
            self.lost = Some(reason);
            let final_score = self.score.session_mut().finish();
            tracing::debug!(?reason, final_score, "run lost");
            self.events.push(FormEvent::GameLost {
                reason,
                final_score,
            });
        }
    }
}

impl std::fmt::Debug for FormManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormManager")
            .field("active", &self.active.len())
            .field("incoming", &self.incoming)
            .field("submitted", &self.submitted)
            .field("score", &self.score.current())
            .field("lost", &self.lost)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoseConfig;
    use crate::forms::{ContentField, FieldType, FillSlotSpec};
    use crate::spawn::{PromptLibrary, PromptSpawnSource, PromptSpec};

    const HIRED: FlagId = FlagId::new(0);

    fn name_form(id: u32) -> FormDefinition {
        FormDefinition::new(FormId::new(id), format!("form-{id}"))
            .with_content(ContentField::title(format!("Form {id}")))
            .with_content(ContentField::slot(FillSlotSpec::new(FieldType::Name)))
    }

    fn manager() -> FormManager {
        FormManager::new(SessionConfig::default())
            .unwrap()
            .with_flag(Flag::new(HIRED, "Hired"), false)
            .with_definition(name_form(1))
            .with_definition(name_form(2))
            .with_definition(name_form(3))
            .with_group(FormGroup::new("intro").with_form(FormId::new(1)).with_form(FormId::new(2)))
            .with_group(FormGroup::new("staff").with_form(FormId::new(3)).requires_on(HIRED))
    }

    fn block(value_type: FieldType) -> WordBlock {
        WordBlock::new(WordBlockId::new(99), value_type, "x")
    }

    fn first_instance(manager: &FormManager) -> FormInstanceId {
        manager.active_forms().next().unwrap().instance_id
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SessionConfig::default().with_lose(LoseConfig {
            max_failures: Some(0),
            max_active_forms: None,
        });
        assert!(matches!(FormManager::new(config), Err(FormDeskError::Config(_))));
    }

    #[test]
    fn test_start_queues_unlocked_groups() {
        let mut m = manager();
        m.start().unwrap();

        assert_eq!(m.active_count(), 1);
        assert_eq!(m.incoming().collect::<Vec<_>>(), vec![FormId::new(2)]);
        assert_eq!(m.unlocked_groups().collect::<Vec<_>>(), vec!["intro"]);
    }

    #[test]
    fn test_queue_ignores_duplicates() {
        let mut m = manager();
        m.start().unwrap();

        assert!(!m.queue_incoming(FormId::new(2)));
        assert!(!m.queue_incoming(FormId::new(1)));
        assert!(!m.queue_incoming(FormId::new(42)));
    }

    #[test]
    fn test_flag_unlocks_group() {
        let mut m = manager();
        m.start().unwrap();
        m.drain_events();

        assert!(m.set_flag(HIRED, true));
        assert!(m.incoming().any(|f| f == FormId::new(3)));

        let events = m.drain_events();
        assert!(events.contains(&FormEvent::FlagChanged { flag: HIRED, state: true }));
        assert!(events.contains(&FormEvent::GroupUnlocked { group: "staff".into() }));

        m.set_flag(HIRED, false);
        assert!(!m.incoming().any(|f| f == FormId::new(3)));
    }

    #[test]
    fn test_submit_success() {
        let mut m = manager();
        m.start().unwrap();
        let id = first_instance(&m);

        m.place_word_block(id, 0, block(FieldType::Name)).unwrap();
        let res = m.submit(id).unwrap();

        assert!(res.success);
        assert_eq!(res.score.delta, 125);
        assert_eq!(m.submitted(), &[FormId::new(1)]);
        assert_eq!(m.state().counters().successful, 1);
        assert!(m.form(id).is_none());
    }

    #[test]
    fn test_submit_invalid_fails() {
        let mut m = manager();
        m.start().unwrap();
        let id = first_instance(&m);

        m.place_word_block(id, 0, block(FieldType::Date)).unwrap();
        let res = m.submit(id).unwrap();

        assert!(!res.success);
        assert_eq!(res.failure, Some(FailureReason::InvalidFields));
        assert_eq!(m.score().current(), 0);
        assert_eq!(m.state().counters().failed, 1);

        // failed forms do not come back
        assert!(!m.queue_incoming(FormId::new(1)));
    }

    #[test]
    fn test_unknown_instance() {
        let mut m = manager();
        m.start().unwrap();
        let ghost = FormInstanceId::new(500);
        assert_eq!(m.submit(ghost), Err(FormDeskError::UnknownForm(ghost)));
        assert_eq!(m.discard(ghost), Err(FormDeskError::UnknownForm(ghost)));
    }

    #[test]
    fn test_tick_before_start_is_noop() {
        let mut m = manager();
        m.tick(100.0);
        assert_eq!(m.active_count(), 0);
    }

    #[test]
    fn test_tick_spawns_on_delay() {
        let mut m = manager();
        m.start().unwrap();

        m.tick(11.9);
        assert_eq!(m.active_count(), 1);
        m.tick(0.2);
        assert_eq!(m.active_count(), 2);
        assert_eq!(m.incoming().count(), 0);
    }

    #[test]
    fn test_start_skips_queue_when_source_yields() {
        let library = PromptLibrary::new(vec![PromptSpec::new(
            "Only",
            "",
            FillSlotSpec::new(FieldType::Name),
        )]);
        let source = PromptSpawnSource::new(library)
            .with_loop(false)
            .with_initial_spawn_count(3);
        let mut m = FormManager::new(SessionConfig::default().with_initial_spawn_count(3))
            .unwrap()
            .with_definition(name_form(1))
            .with_definition(name_form(2))
            .with_group(FormGroup::new("intro").with_form(FormId::new(1)).with_form(FormId::new(2)))
            .with_source(Box::new(source));
        m.start().unwrap();

        // one prompt form, the group forms wait for the arrival timer
        assert_eq!(m.active_count(), 1);
        let form = m.active_forms().next().unwrap().form_id;
        assert_eq!(m.registry().get(form).and_then(|d| d.title()), Some("Only"));
        assert_eq!(m.incoming().collect::<Vec<_>>(), vec![FormId::new(1), FormId::new(2)]);
    }

    #[test]
    fn test_tick_ignores_non_finite_dt() {
        let mut m = manager();
        m.start().unwrap();

        m.tick(f32::NAN);
        m.tick(f32::INFINITY);
        assert_eq!(m.active_count(), 1);
        assert_eq!(m.time_until_next_form(), m.state().arrival_delay());
    }

    #[test]
    fn test_spawn_form_directly() {
        let mut m = manager();
        m.start().unwrap();

        let id = m.spawn_form(FormId::new(2)).unwrap();
        assert_eq!(m.form(id).map(|f| f.form_id), Some(FormId::new(2)));
        assert_eq!(m.incoming().count(), 0);
        assert_eq!(
            m.spawn_form(FormId::new(9)),
            Err(FormDeskError::UnknownDefinition(FormId::new(9)))
        );
    }

    #[test]
    fn test_take_and_return_blocks() {
        let mut m = manager().with_word_blocks(vec![WordBlockDefinition::new(
            WordBlockDefId::new(0),
            FieldType::Name,
            "Ada",
        )]);
        m.start().unwrap();

        let b = m.take_word_block(WordBlockDefId::new(0)).unwrap();
        assert_eq!(m.state().owned_word_blocks().len(), 1);
        assert!(m.return_word_block(b.id));
        assert!(m.take_word_block(WordBlockDefId::new(5)).is_none());
    }
}
