//! The deprecated flat `conditionalText` variant.

use case_rules::{CaseState, LegacyEntry, LocationAddress};
use tracing::warn;

use super::{apply_updates, lock_location, Evaluation};
use crate::render::RenderInstruction;

/// Evaluate every entry independently; a missing clue never blocks later entries.
///
/// An entry's `prompt` is rendered whether or not its clue requirement is met.
pub fn evaluate_legacy(
    entries: &[LegacyEntry],
    state: &mut CaseState,
    location: &LocationAddress,
) -> Evaluation {
    warn!(%location, "Location uses deprecated conditionalText");

    let mut evaluation = Evaluation {
        succeeded: true,
        ..Default::default()
    };

    for entry in entries {
        let met = entry.requires_letter.map_or(true, |clue| state.holds_clue(clue));

        if !met {
            if let Some(prompt) = &entry.prompt {
                evaluation.instructions.push(RenderInstruction::prompt(prompt));
            }
            continue;
        }

        if let Some(text) = &entry.text {
            evaluation.instructions.push(RenderInstruction::text(text));
        }
        if let Some(prompt) = &entry.prompt {
            evaluation.instructions.push(RenderInstruction::prompt(prompt));
        }

        let updates = entry.updates();
        if !updates.is_empty() {
            warn!(%location, "Applying updates from deprecated conditionalText");
            apply_updates(state, &updates, &mut evaluation.instructions);
        }

        if entry.location_lock {
            lock_location(state, location, &mut evaluation.instructions);
        }

        evaluation.actions.extend(entry.actions.iter().cloned());
    }

    evaluation
}
