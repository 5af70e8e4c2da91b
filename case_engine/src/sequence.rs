//! Sequence Player.

use case_rules::{Action, CaseContent, CaseState, Sequence, SequenceId};
use tracing::{debug, error};

use crate::evaluator::apply_updates;
use crate::outcome::{ActionSurface, Diagnostic, Transition};
use crate::render::RenderInstruction;

/// Play a sequence of the current location.
///
/// A sequence that offers no actions gets a single "Leave Location" action.
pub fn play(content: &CaseContent, state: &mut CaseState, id: &SequenceId) -> Transition {
    let sequence = match find(content, state, id) {
        Ok(sequence) => sequence,
        Err(diagnostic) => {
            error!(%diagnostic, "Sequence aborted");
            return Transition::aborted(diagnostic);
        }
    };

    debug!(sequence = %id, "Playing sequence");

    let mut instructions = vec![RenderInstruction::Separator];
    if let Some(text) = &sequence.text {
        instructions.push(RenderInstruction::text(text));
    }

    let mut refresh = false;
    if let Some(updates) = &sequence.updates {
        apply_updates(state, updates, &mut instructions);
        refresh = true;
    }

    let actions = if sequence.actions.is_empty() {
        vec![Action::leave()]
    } else {
        sequence.actions.clone()
    };

    Transition::proceeded(instructions, ActionSurface::Replace(actions)).with_refresh(refresh)
}

/// Resolve a sequence id against the current location.
pub(crate) fn find<'a>(
    content: &'a CaseContent,
    state: &CaseState,
    id: &SequenceId,
) -> Result<&'a Sequence, Diagnostic> {
    let location = state
        .current_location()
        .ok_or_else(|| Diagnostic::NoCurrentLocation(id.clone()))?;
    content
        .location(location)
        .ok_or_else(|| Diagnostic::UnknownLocation(location.clone()))?
        .sequence(id)
        .ok_or_else(|| Diagnostic::UnknownSequence {
            location: location.clone(),
            sequence: id.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use case_rules::{CaseMetadata, LocationAddress, LocationDefinition, StateUpdates};

    use crate::outcome::Outcome;

    fn addr() -> LocationAddress {
        "68 WC".parse().unwrap()
    }

    fn content() -> CaseContent {
        CaseContent::new(CaseMetadata::default()).with_location(
            addr(),
            LocationDefinition::new("A furnace room.")
                .with_sequence(
                    "burn_wig",
                    Sequence::new("The wig curls and blackens.")
                        .with_updates(StateUpdates::new().with_flag("destroyedWigMoustache", true)),
                )
                .with_sequence(
                    "inspect",
                    Sequence::new("Three uniforms hang here.")
                        .with_action(Action::new("look_closer", "Look closer")),
                ),
        )
    }

    #[test]
    fn test_sequence_without_actions_offers_leave() {
        let content = content();
        let mut state = CaseState::new();
        state.enter_location(&addr());

        let transition = play(&content, &mut state, &SequenceId::new("burn_wig"));

        assert_eq!(transition.outcome, Outcome::Proceeded);
        assert!(transition.refresh);
        assert!(state.flag_is_set("destroyedWigMoustache"));
        assert_eq!(transition.surface, ActionSurface::Replace(vec![Action::leave()]));
        assert_eq!(
            transition.instructions,
            vec![
                RenderInstruction::Separator,
                RenderInstruction::text("The wig curls and blackens."),
            ]
        );
    }

    #[test]
    fn test_sequence_actions_replace_surface() {
        let content = content();
        let mut state = CaseState::new();
        state.enter_location(&addr());

        let transition = play(&content, &mut state, &SequenceId::new("inspect"));

        assert!(!transition.refresh);
        assert_eq!(
            transition.surface,
            ActionSurface::Replace(vec![Action::new("look_closer", "Look closer")])
        );
    }

    #[test]
    fn test_unknown_sequence_aborts() {
        let content = content();
        let mut state = CaseState::new();
        state.enter_location(&addr());

        let transition = play(&content, &mut state, &SequenceId::new("missing"));

        assert_eq!(
            transition.outcome,
            Outcome::Aborted(Diagnostic::UnknownSequence {
                location: addr(),
                sequence: SequenceId::new("missing"),
            })
        );
    }

    #[test]
    fn test_sequence_without_current_location_aborts() {
        let content = content();
        let mut state = CaseState::new();

        let transition = play(&content, &mut state, &SequenceId::new("inspect"));

        assert_eq!(
            transition.outcome,
            Outcome::Aborted(Diagnostic::NoCurrentLocation(SequenceId::new("inspect")))
        );
    }
}
