//! Condition trees and the legacy conditional-text entries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Action, Clue};
use crate::state::{FlagValue, StateUpdates};

/// What a condition checks before its success branch is taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// No check authored; always met.
    Always,
    /// The player holds this clue.
    HoldsClue(Clue),
    /// The named flag is truthy.
    FlagSet(String),
    /// A check kind the engine does not understand. Never met.
    Unrecognized(String),
}

/// A node in a condition tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawCondition", into = "RawCondition")]
pub struct Condition {
    pub check: Check,
    pub on_success: SuccessBranch,
    /// Shown instead of the success branch when the check fails.
    pub prompt_if_false: Option<String>,
}

impl Condition {
    /// A condition with no check.
    pub fn always(on_success: SuccessBranch) -> Self {
        Self {
            check: Check::Always,
            on_success,
            prompt_if_false: None,
        }
    }

    /// A condition gated on holding a clue.
    pub fn requires_clue(clue: Clue, on_success: SuccessBranch) -> Self {
        Self {
            check: Check::HoldsClue(clue),
            on_success,
            prompt_if_false: None,
        }
    }

    /// A condition gated on a truthy flag.
    pub fn requires_flag(flag: impl Into<String>, on_success: SuccessBranch) -> Self {
        Self {
            check: Check::FlagSet(flag.into()),
            on_success,
            prompt_if_false: None,
        }
    }

    pub fn with_prompt_if_false(mut self, prompt: impl Into<String>) -> Self {
        self.prompt_if_false = Some(prompt.into());
        self
    }
}

/// Everything that happens when a condition is met.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessBranch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updates: Option<StateUpdates>,

    /// Nested conditions; if any of them fails, this branch's actions are dropped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub follow_up_conditions: Vec<Condition>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,

    /// Lock the current location when this branch is taken.
    #[serde(default)]
    pub location_lock: bool,
}

impl SuccessBranch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_updates(mut self, updates: StateUpdates) -> Self {
        self.updates = Some(updates);
        self
    }

    pub fn with_follow_up(mut self, condition: Condition) -> Self {
        self.follow_up_conditions.push(condition);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_location_lock(mut self) -> Self {
        self.location_lock = true;
        self
    }
}

/// Condition as authored: a string tag plus loosely-typed payload fields.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    check: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    letter: Option<Clue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    flag_name: Option<String>,
    #[serde(default)]
    on_success: SuccessBranch,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prompt_if_false: Option<String>,
}

const CHECK_REQUIRES_LETTER: &str = "requiresLetter";
const CHECK_FLAG_SET: &str = "flagSet";

impl From<RawCondition> for Condition {
    fn from(raw: RawCondition) -> Self {
        let check = match raw.check.as_deref() {
            None => Check::Always,
            Some(CHECK_REQUIRES_LETTER) => match raw.letter {
                Some(clue) => Check::HoldsClue(clue),
                None => Check::Unrecognized(format!("{CHECK_REQUIRES_LETTER} without letter")),
            },
            Some(CHECK_FLAG_SET) => match raw.flag_name {
                Some(flag) => Check::FlagSet(flag),
                None => Check::Unrecognized(format!("{CHECK_FLAG_SET} without flagName")),
            },
            Some(other) => Check::Unrecognized(other.to_string()),
        };

        Self {
            check,
            on_success: raw.on_success,
            prompt_if_false: raw.prompt_if_false,
        }
    }
}

impl From<Condition> for RawCondition {
    fn from(condition: Condition) -> Self {
        let (check, letter, flag_name) = match condition.check {
            Check::Always => (None, None, None),
            Check::HoldsClue(clue) => (Some(CHECK_REQUIRES_LETTER.to_string()), Some(clue), None),
            Check::FlagSet(flag) => (Some(CHECK_FLAG_SET.to_string()), None, Some(flag)),
            Check::Unrecognized(kind) => (Some(kind), None, None),
        };

        Self {
            check,
            letter,
            flag_name,
            on_success: condition.on_success,
            prompt_if_false: condition.prompt_if_false,
        }
    }
}

/// An entry of the deprecated flat `conditionalText` list.
///
/// Entries never short-circuit: each one is evaluated on its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_letter: Option<Clue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Rendered whether or not the clue requirement is met.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updates_game_state: Option<BTreeMap<String, FlagValue>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circles_letter: Option<Clue>,

    #[serde(default)]
    pub location_lock: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

impl LegacyEntry {
    /// The entry's flag and clue effects as a single update bag.
    pub fn updates(&self) -> StateUpdates {
        StateUpdates {
            clue: self.circles_letter,
            flags: self.updates_game_state.clone().unwrap_or_default(),
        }
    }
}
