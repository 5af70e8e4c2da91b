//! Condition Evaluator - decides what a location shows after its base text.
//!
//! Two variants sit behind [`evaluate_branching`]:
//!
//! - **Conditions**: an ordered, nested tree. The first unmet condition stops
//!   its level, and a failed follow-up stops the parent. Actions surface only
//!   when the whole top-level list succeeds; a level that collects actions of
//!   its own replaces those of its follow-ups.
//! - **Legacy** (`conditionalText`): a flat list where every entry is evaluated
//!   independently and nothing short-circuits.
//!
//! Both variants mutate the [`CaseState`] they are handed (flag updates, clue
//! grants, locks) and return everything else as an [`Evaluation`].

mod legacy;

pub use legacy::*;

use case_rules::{Action, Branching, CaseState, Check, Condition, LocationAddress, StateUpdates};
use tracing::{debug, info, warn};

use crate::render::RenderInstruction;

/// Accumulated output of evaluating a condition list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Evaluation {
    pub instructions: Vec<RenderInstruction>,
    /// Actions to surface. Always empty when `succeeded` is false.
    pub actions: Vec<Action>,
    pub succeeded: bool,
}

/// Run whichever variant the location was loaded with.
///
/// Returns `None` for locations with base text only.
pub fn evaluate_branching(
    branching: &Branching,
    state: &mut CaseState,
    location: &LocationAddress,
) -> Option<Evaluation> {
    match branching {
        Branching::Conditions(conditions) => Some(evaluate_conditions(conditions, state, location)),
        Branching::Legacy(entries) => Some(evaluate_legacy(entries, state, location)),
        Branching::Plain => None,
    }
}

/// Evaluate an ordered condition list, recursing into follow-ups.
pub fn evaluate_conditions(
    conditions: &[Condition],
    state: &mut CaseState,
    location: &LocationAddress,
) -> Evaluation {
    let mut evaluation = Evaluation {
        succeeded: true,
        ..Default::default()
    };
    let mut follow_up_actions = Vec::new();

    for condition in conditions {
        if !check_met(&condition.check, state) {
            if let Some(prompt) = &condition.prompt_if_false {
                evaluation.instructions.push(RenderInstruction::prompt(prompt));
            }
            evaluation.succeeded = false;
            break;
        }

        let branch = &condition.on_success;

        if let Some(text) = &branch.text {
            evaluation.instructions.push(RenderInstruction::text(text));
        }
        if let Some(updates) = &branch.updates {
            apply_updates(state, updates, &mut evaluation.instructions);
        }
        if branch.location_lock {
            lock_location(state, location, &mut evaluation.instructions);
        }

        if !branch.follow_up_conditions.is_empty() {
            let nested = evaluate_conditions(&branch.follow_up_conditions, state, location);
            evaluation.instructions.extend(nested.instructions);
            if !nested.succeeded {
                evaluation.succeeded = false;
                break;
            }
            follow_up_actions.extend(nested.actions);
        }

        evaluation.actions.extend(branch.actions.iter().cloned());
    }

    // A level's own actions replace whatever its follow-ups offered.
    if !evaluation.succeeded {
        evaluation.actions.clear();
    } else if evaluation.actions.is_empty() {
        evaluation.actions = follow_up_actions;
    }

    debug!(
        %location,
        succeeded = evaluation.succeeded,
        actions = evaluation.actions.len(),
        "Evaluated conditions"
    );

    evaluation
}

fn check_met(check: &Check, state: &CaseState) -> bool {
    match check {
        Check::Always => true,
        Check::HoldsClue(clue) => state.holds_clue(*clue),
        Check::FlagSet(flag) => state.flag_is_set(flag),
        Check::Unrecognized(kind) => {
            warn!(check = %kind, "Unknown condition check type, treating as failed");
            false
        }
    }
}

/// Merge an update bag and announce a newly circled clue.
pub(crate) fn apply_updates(
    state: &mut CaseState,
    updates: &StateUpdates,
    instructions: &mut Vec<RenderInstruction>,
) {
    if let Some(clue) = state.apply_updates(updates) {
        info!(%clue, "Found clue");
        instructions.push(RenderInstruction::ClueFound(clue));
    }
    if !updates.flags.is_empty() {
        debug!(flags = ?updates.flags.keys().collect::<Vec<_>>(), "Applied flag updates");
    }
}

/// Lock a location and announce it. Returns `true` if it was newly locked.
pub(crate) fn lock_location(
    state: &mut CaseState,
    location: &LocationAddress,
    instructions: &mut Vec<RenderInstruction>,
) -> bool {
    if !state.lock_location(location) {
        return false;
    }
    info!(%location, "Location locked");
    instructions.push(RenderInstruction::LocationLocked(location.clone()));
    true
}
