//! Action views: what a renderer needs to draw buttons.

use case_rules::{Action, ActionId, CaseState};
use serde::{Deserialize, Serialize};

/// A sub-choice button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceView {
    pub id: ActionId,
    pub label: String,
    pub disabled: bool,
}

/// A presented action, either a single button or a prompt with choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionView {
    pub id: ActionId,
    pub label: String,
    pub disabled: bool,
    pub choices: Vec<ChoiceView>,
}

impl ActionView {
    /// Build the view, marking it disabled when state makes it unavailable.
    ///
    /// An action is unavailable once any choice it records has been made, or
    /// when it locks the current location and that location is already locked.
    pub fn from_action(action: &Action, state: &CaseState) -> Self {
        let choice_made = action
            .consequences
            .choice_guards()
            .any(|guard| state.flag_is_set(guard));
        let already_locked = action.consequences.locks_location()
            && state
                .current_location()
                .is_some_and(|current| state.is_locked(current));
        let disabled = choice_made || already_locked;

        Self {
            id: action.id.clone(),
            label: action.text.clone(),
            disabled,
            choices: action
                .choices
                .iter()
                .map(|choice| ChoiceView {
                    id: choice.id.clone(),
                    label: choice.text.clone(),
                    disabled,
                })
                .collect(),
        }
    }
}

/// Views for a whole action list, in order.
pub fn present(actions: &[Action], state: &CaseState) -> Vec<ActionView> {
    actions
        .iter()
        .map(|action| ActionView::from_action(action, state))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use case_rules::{Consequence, LocationAddress};

    fn burn_choice() -> Action {
        Action::new("choose_burn_item_68wc", "Which uniform do you burn?")
            .with_consequence(Consequence::record_choice("item_burned_68wc"))
            .with_choice("burn_footman_uniform", "Footman's uniform")
            .with_choice("burn_cook_uniform", "Cook's uniform")
    }

    #[test]
    fn test_choices_enabled_before_choice() {
        let state = CaseState::new();
        let view = ActionView::from_action(&burn_choice(), &state);

        assert!(!view.disabled);
        assert_eq!(view.choices.len(), 2);
        assert!(view.choices.iter().all(|c| !c.disabled));
    }

    #[test]
    fn test_choices_disabled_after_choice() {
        let mut state = CaseState::new();
        state.set_flag("item_burned_68wc_chosen", true);

        let view = ActionView::from_action(&burn_choice(), &state);
        assert!(view.disabled);
        assert!(view.choices.iter().all(|c| c.disabled));
    }

    #[test]
    fn test_lock_action_disabled_when_location_locked() {
        let mut state = CaseState::new();
        let address: LocationAddress = "68 WC".parse().unwrap();
        let break_in = Action::new("attempt_break_in_68wc", "Break in")
            .with_consequence(Consequence::LockLocation);

        state.enter_location(&address);
        assert!(!ActionView::from_action(&break_in, &state).disabled);

        state.lock_location(&address);
        assert!(ActionView::from_action(&break_in, &state).disabled);
    }

    #[test]
    fn test_present_preserves_order() {
        let state = CaseState::new();
        let actions = vec![Action::new("a", "First"), Action::new("b", "Second")];

        let views = present(&actions, &state);
        assert_eq!(views[0].label, "First");
        assert_eq!(views[1].label, "Second");
    }
}
