//! Events and resolution outcomes emitted by the form manager.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{FlagId, FormId, FormInstanceId};
use crate::forms::{FieldType, ValidationResult};
use crate::rewards::RewardResult;
use crate::scoring::ScoreChange;

/// How a form left the desk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionKind {
    Submitted,
    Discarded,
    Expired,
}

/// Why a resolution counted as a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureReason {
    /// Submitted with wrong or empty slots.
    InvalidFields,
    /// Submitted a form that should have been discarded.
    ShouldHaveDiscarded,
    /// Discarded a form that should have been submitted.
    WronglyDiscarded,
    /// The timer ran out.
    Expired,
}

/// Why a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoseReason {
    TooManyFailures,
    DeskOverflow,
}

/// Something the host may want to react to.
///
/// Events queue up inside the manager in the order they happen; the host
/// drains them with [`FormManager::drain_events`](super::FormManager::drain_events).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FormEvent {
    /// A group's flag condition held for the first time.
    GroupUnlocked { group: String },

    /// A flag changed (through a reward or the host).
    FlagChanged { flag: FlagId, state: bool },

    /// A form landed on the desk.
    FormCreated {
        instance: FormInstanceId,
        form: FormId,
    },

    /// A form was submitted correctly.
    FormSubmitted {
        instance: FormInstanceId,
        form: FormId,
    },

    /// A submission or a timer ended in failure.
    FormFailed {
        instance: FormInstanceId,
        form: FormId,
        reason: FailureReason,
    },

    /// A form was discarded. `correct` when it was meant to be.
    FormDiscarded {
        instance: FormInstanceId,
        form: FormId,
        correct: bool,
    },

    ScoreChanged(ScoreChange),

    /// The run is over.
    GameLost { reason: LoseReason, final_score: i64 },
}

/// Full outcome of resolving one form.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub instance: FormInstanceId,
    pub form: FormId,
    pub kind: ResolutionKind,
    pub success: bool,
    pub failure: Option<FailureReason>,
    pub validation: ValidationResult,
    /// Values the form held when it left the desk.
    pub data: BTreeMap<FieldType, String>,
    pub score: ScoreChange,
    pub rewards: Vec<RewardResult>,
}
