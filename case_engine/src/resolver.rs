//! Action Resolver - applies the declarative consequences of a chosen action.

use case_rules::{ActionId, CaseContent, CaseState, Consequence, Consequences};
use tracing::{debug, error, info, warn};

use crate::evaluator::lock_location;
use crate::outcome::{ActionSurface, Transition};
use crate::render::Notice;
use crate::{screens, sequence};

/// Apply every consequence of `chosen`, in declaration order.
///
/// Validation happens up front: an already-made choice is rejected and a
/// missing sequence aborts, both before any state is touched.
pub fn resolve(
    content: &CaseContent,
    state: &mut CaseState,
    chosen: &ActionId,
    consequences: &Consequences,
) -> Transition {
    if consequences.choice_guards().any(|guard| state.flag_is_set(guard)) {
        info!(action = %chosen, "Rejected repeated exclusive choice");
        return Transition::rejected(Notice::error("You already made a choice here."));
    }

    for consequence in consequences.iter() {
        if let Consequence::TriggerSequence(id) = consequence {
            if let Err(diagnostic) = sequence::find(content, state, id) {
                error!(action = %chosen, %diagnostic, "Action aborted");
                return Transition::aborted(diagnostic);
            }
        }
    }

    let mut transition = Transition::proceeded(Vec::new(), ActionSurface::Keep);
    let mut sequence_played = false;

    for consequence in consequences.iter() {
        match consequence {
            Consequence::LockLocation => match state.current_location().cloned() {
                Some(location) => {
                    if lock_location(state, &location, &mut transition.instructions) {
                        transition.refresh = true;
                    }
                }
                None => warn!(action = %chosen, "Lock requested with no current location"),
            },
            Consequence::RecordChoice { key, guard } => {
                state.set_flag(key.clone(), chosen.as_str());
                state.set_flag(guard.clone(), true);
                info!(action = %chosen, key = %key, "Recorded choice");
                transition.instructions.push(choice_notice(chosen).into());
                transition.refresh = true;
            }
            Consequence::TriggerSequence(id) => {
                let played = sequence::play(content, state, id);
                transition.instructions.extend(played.instructions);
                transition.surface = played.surface;
                transition.refresh |= played.refresh;
                sequence_played = true;
            }
            Consequence::EndInteraction => {
                if sequence_played {
                    debug!(action = %chosen, "Sequence already replaced actions");
                } else {
                    transition.surface = ActionSurface::Clear;
                }
            }
            Consequence::ReturnToIntroduction => {
                let intro = screens::introduction(content, state);
                transition.instructions.extend(intro.instructions);
                transition.surface = intro.surface;
            }
        }
    }

    transition
}

fn choice_notice(chosen: &ActionId) -> Notice {
    match chosen.describe() {
        Some((verb, item)) => Notice::info(format!("You chose to {verb} the {item}.")),
        None => Notice::info(format!("You chose {chosen}.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use case_rules::{
        Action, CaseMetadata, LocationAddress, LocationDefinition, Sequence, SequenceId,
        StateUpdates,
    };

    use crate::outcome::{Diagnostic, Outcome};
    use crate::render::{IntroductionView, RenderInstruction};

    fn here() -> LocationAddress {
        "68 WC".parse().unwrap()
    }

    fn content() -> CaseContent {
        CaseContent::new(CaseMetadata {
            intro: "Back at Baker Street.".to_string(),
            ..Default::default()
        })
        .with_location(
            here(),
            LocationDefinition::new("A furnace room.").with_sequence(
                "burned_uniform",
                Sequence::new("The uniform burns.")
                    .with_updates(StateUpdates::new().with_flag("burnedUniform", true)),
            ),
        )
    }

    fn burn() -> Consequences {
        Consequences::new(vec![
            Consequence::record_choice("item_burned_68wc"),
            Consequence::TriggerSequence(SequenceId::new("burned_uniform")),
        ])
    }

    fn at_furnace() -> CaseState {
        let mut state = CaseState::new();
        state.enter_location(&here());
        state
    }

    #[test]
    fn test_exclusive_choice_recorded_once() {
        let content = content();
        let mut state = at_furnace();

        let first = resolve(&content, &mut state, &ActionId::new("burn_footman_uniform"), &burn());
        assert_eq!(first.outcome, Outcome::Proceeded);
        assert_eq!(
            first.instructions[0],
            RenderInstruction::Notice(Notice::info("You chose to burn the footman uniform."))
        );
        assert_eq!(
            state.flag("item_burned_68wc").and_then(|v| v.as_str()),
            Some("burn_footman_uniform")
        );
        assert!(state.flag_is_set("item_burned_68wc_chosen"));

        let before = state.clone();
        let second = resolve(&content, &mut state, &ActionId::new("burn_warden_uniform"), &burn());
        assert_eq!(
            second.outcome,
            Outcome::Rejected(Notice::error("You already made a choice here."))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_sequence_replaces_surface_and_ignores_end() {
        let content = content();
        let mut state = at_furnace();
        let consequences = Consequences::new(vec![
            Consequence::TriggerSequence(SequenceId::new("burned_uniform")),
            Consequence::EndInteraction,
        ]);

        let transition = resolve(&content, &mut state, &ActionId::new("burn"), &consequences);

        assert_eq!(transition.surface, ActionSurface::Replace(vec![Action::leave()]));
        assert!(state.flag_is_set("burnedUniform"));
    }

    #[test]
    fn test_lock_is_idempotent() {
        let content = content();
        let mut state = at_furnace();
        let consequences = Consequences::new(vec![Consequence::LockLocation, Consequence::EndInteraction]);

        let first = resolve(&content, &mut state, &ActionId::new("leave"), &consequences);
        assert!(state.is_locked(&here()));
        assert!(first.refresh);
        assert_eq!(first.surface, ActionSurface::Clear);
        assert_eq!(first.instructions, vec![RenderInstruction::LocationLocked(here())]);

        let second = resolve(&content, &mut state, &ActionId::new("leave"), &consequences);
        assert_eq!(second.outcome, Outcome::Proceeded);
        assert!(second.instructions.is_empty());
    }

    #[test]
    fn test_missing_sequence_aborts_before_recording() {
        let content = content();
        let mut state = at_furnace();
        let consequences = Consequences::new(vec![
            Consequence::record_choice("item_burned_68wc"),
            Consequence::TriggerSequence(SequenceId::new("missing")),
        ]);

        let transition = resolve(&content, &mut state, &ActionId::new("burn_cook_uniform"), &consequences);

        assert!(matches!(
            transition.outcome,
            Outcome::Aborted(Diagnostic::UnknownSequence { .. })
        ));
        assert!(state.flags().is_empty());
    }

    #[test]
    fn test_return_to_introduction() {
        let content = content();
        let mut state = at_furnace();
        let consequences = Consequences::new(vec![Consequence::ReturnToIntroduction]);

        let transition = resolve(&content, &mut state, &ActionId::new("leave_location"), &consequences);

        assert!(state.current_location().is_none());
        assert_eq!(transition.surface, ActionSurface::Clear);
        assert_eq!(
            transition.instructions,
            vec![RenderInstruction::Introduction(IntroductionView {
                title: None,
                date: None,
                intro: "Back at Baker Street.".to_string(),
            })]
        );
    }

    #[test]
    fn test_plain_choice_notice() {
        assert_eq!(
            choice_notice(&ActionId::new("accuse")),
            Notice::info("You chose accuse.")
        );
    }
}
