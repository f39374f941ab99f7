//! Shuffled prompt cycle.
//!
//! Prompts are dealt like a deck: every prompt once, in a shuffled order,
//! then a fresh shuffle for the next cycle (or nothing more, when looping
//! is off). If the number of prompts changes, a new cycle starts.

use rustc_hash::FxHashSet;

use super::prompt::{PromptFormFactory, PromptLibrary, PromptSpec};
use super::source::FormSpawnSource;
use crate::core::{FormId, GameRng};
use crate::forms::FormRegistry;

/// Spawn source dealing runtime forms from a prompt library.
///
/// ```
/// use form_desk::core::GameRng;
/// use form_desk::forms::{FieldType, FillSlotSpec, FormRegistry};
/// use form_desk::spawn::{FormSpawnSource, PromptLibrary, PromptSpawnSource, PromptSpec};
///
/// let library = PromptLibrary::new(vec![
///     PromptSpec::new("A", "", FillSlotSpec::new(FieldType::Name)),
///     PromptSpec::new("B", "", FillSlotSpec::new(FieldType::Date)),
/// ]);
/// let mut source = PromptSpawnSource::new(library).with_loop(false);
/// let mut registry = FormRegistry::new();
/// source.initialize(&GameRng::new(1));
///
/// assert!(source.next_form(&mut registry).is_some());
/// assert!(source.next_form(&mut registry).is_some());
/// assert!(source.next_form(&mut registry).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct PromptSpawnSource {
    factory: PromptFormFactory,
    library: PromptLibrary,
    fallback: Vec<PromptSpec>,
    initial_spawn_count: usize,
    loop_prompts: bool,

    order: Vec<usize>,
    cursor: usize,
    cached_count: Option<usize>,
    rng: GameRng,
    issued: FxHashSet<FormId>,
}

impl PromptSpawnSource {
    #[must_use]
    pub fn new(library: PromptLibrary) -> Self {
        Self {
            factory: PromptFormFactory::new(),
            library,
            fallback: Vec::new(),
            initial_spawn_count: 1,
            loop_prompts: true,
            order: Vec::new(),
            cursor: 0,
            cached_count: None,
            rng: GameRng::new(0),
            issued: FxHashSet::default(),
        }
    }

    /// Prompts used while the library is empty.
    #[must_use]
    pub fn with_fallback(mut self, prompts: Vec<PromptSpec>) -> Self {
        self.fallback = prompts;
        self
    }

    #[must_use]
    pub fn with_factory(mut self, factory: PromptFormFactory) -> Self {
        self.factory = factory;
        self
    }

    #[must_use]
    pub fn with_initial_spawn_count(mut self, count: usize) -> Self {
        self.initial_spawn_count = count;
        self
    }

    #[must_use]
    pub fn with_loop(mut self, loop_prompts: bool) -> Self {
        self.loop_prompts = loop_prompts;
        self
    }

    /// Mutable access to the library. A size change starts a new cycle.
    pub fn library_mut(&mut self) -> &mut PromptLibrary {
        &mut self.library
    }

    fn prompts(&self) -> &[PromptSpec] {
        if self.library.is_empty() {
            &self.fallback
        } else {
            &self.library.prompts
        }
    }

    fn ensure_cycle(&mut self, count: usize) {
        if self.cached_count == Some(count) && self.order.len() == count {
            return;
        }
        self.cached_count = Some(count);
        self.order = (0..count).collect();
        self.rng.shuffle(&mut self.order);
        self.cursor = 0;
    }

    /// Runtime definitions handed out and not yet released.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.issued.len()
    }
}

impl FormSpawnSource for PromptSpawnSource {
    fn initialize(&mut self, rng: &GameRng) {
        self.rng = rng.for_context("prompts");
        self.order.clear();
        self.cursor = 0;
        self.cached_count = None;
    }

    fn initial_forms(&mut self, registry: &mut FormRegistry) -> Vec<FormId> {
        let mut forms = Vec::with_capacity(self.initial_spawn_count);
        for _ in 0..self.initial_spawn_count {
            match self.next_form(registry) {
                Some(id) => forms.push(id),
                None => break,
            }
        }
        forms
    }

    fn next_form(&mut self, registry: &mut FormRegistry) -> Option<FormId> {
        let count = self.prompts().len();
        if count == 0 {
            return None;
        }

        self.ensure_cycle(count);
        if self.cursor >= self.order.len() {
            if !self.loop_prompts {
                return None;
            }
            self.rng.shuffle(&mut self.order);
            self.cursor = 0;
        }

        let index = self.order[self.cursor];
        self.cursor += 1;

        let def = self.factory.create(&self.prompts()[index])?;
        let id = registry.register_auto(def);
        self.issued.insert(id);
        Some(id)
    }

    fn release(&mut self, form: FormId, registry: &mut FormRegistry) {
        if self.issued.remove(&form) {
            registry.remove(form);
        }
    }
}
