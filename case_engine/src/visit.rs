//! Visit Orchestrator.

use case_rules::{CaseContent, CaseState, LocationAddress};
use tracing::{debug, error, info};

use crate::evaluator::{apply_updates, evaluate_branching};
use crate::outcome::{ActionSurface, Diagnostic, Transition};
use crate::render::{Notice, RenderInstruction};

/// Enter `address` and render everything it shows.
///
/// A locked address is rejected before anything is read or written. An
/// unknown address aborts with a diagnostic and leaves state untouched.
pub fn visit(content: &CaseContent, state: &mut CaseState, address: &LocationAddress) -> Transition {
    if state.is_locked(address) {
        info!(%address, "Rejected visit to locked location");
        return Transition::rejected(Notice::error(format!("You cannot return to {address}.")));
    }

    let Some(location) = content.location(address) else {
        let diagnostic = Diagnostic::UnknownLocation(address.clone());
        error!(%diagnostic, "Visit aborted");
        return Transition::aborted(diagnostic);
    };

    state.enter_location(address);
    let first_visit = state.record_visit(address);
    info!(
        %address,
        first_visit,
        leads_followed = state.leads_followed(),
        "Visiting location"
    );

    let mut instructions = vec![RenderInstruction::Heading(address.to_string())];

    if let Some(clue) = location.clue {
        if state.grant_clue(clue) {
            info!(%clue, "Found clue");
            instructions.push(RenderInstruction::ClueFound(clue));
        }
    }

    instructions.push(RenderInstruction::text(&location.text));

    if let Some(updates) = &location.updates {
        apply_updates(state, updates, &mut instructions);
    }

    let actions = match evaluate_branching(&location.branching, state, address) {
        Some(evaluation) => {
            instructions.extend(evaluation.instructions);
            evaluation.actions
        }
        None => {
            debug!(%address, "Location has base text only");
            Vec::new()
        }
    };

    Transition::proceeded(instructions, ActionSurface::Replace(actions))
}
