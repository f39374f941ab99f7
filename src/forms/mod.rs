//! Form system: word blocks, definitions, groups, registry, live forms.
//!
//! ## Key Types
//!
//! - `FieldType` / `WordBlock`: typed values the player drags around
//! - `FormDefinition`: static form content, timer, rewards
//! - `FormGroup`: forms gated by flag conditions
//! - `FormRegistry`: definition lookup
//! - `Form`: a live instance with filled slots and a running timer

pub mod block;
pub mod definition;
pub mod group;
pub mod instance;
pub mod registry;

pub use block::{FieldType, WordBlock};
pub use definition::{ContentField, ContentKind, FillSlotSpec, FormDefinition};
pub use group::{FlagList, FormGroup};
pub use instance::{Form, SlotState, ValidationResult};
pub use registry::FormRegistry;
