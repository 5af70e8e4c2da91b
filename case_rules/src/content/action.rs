//! Actions, their declarative consequences, and sequences.

use serde::{Deserialize, Serialize};

use super::SequenceId;
use crate::state::StateUpdates;

/// Identifier of an action or of one sub-choice of an action.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split a `verb_item_words` id into a verb and a readable item name.
    ///
    /// `burn_footman_uniform` describes as ("burn", "footman uniform").
    pub fn describe(&self) -> Option<(&str, String)> {
        let (verb, rest) = self.0.split_once('_')?;
        if verb.is_empty() || rest.is_empty() {
            return None;
        }
        Some((verb, rest.replace('_', " ")))
    }
}

impl From<&str> for ActionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A declarative effect attached to an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Consequence {
    /// Lock the current location.
    LockLocation,
    /// Record the chosen id under `key`, at most once per `guard`.
    RecordChoice { key: String, guard: String },
    /// Play a sequence of the current location.
    TriggerSequence(SequenceId),
    /// Clear the action surface.
    EndInteraction,
    /// Go back to the introduction screen.
    ReturnToIntroduction,
}

impl Consequence {
    /// A choice record with the default guard flag name.
    pub fn record_choice(key: impl Into<String>) -> Self {
        let key = key.into();
        let guard = default_choice_guard(&key);
        Consequence::RecordChoice { key, guard }
    }
}

fn default_choice_guard(key: &str) -> String {
    format!("{key}_chosen")
}

/// The ordered consequences of an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawConsequences", into = "RawConsequences")]
pub struct Consequences(Vec<Consequence>);

impl Consequences {
    pub fn new(consequences: Vec<Consequence>) -> Self {
        Self(consequences)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Consequence> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn locks_location(&self) -> bool {
        self.0.iter().any(|c| matches!(c, Consequence::LockLocation))
    }

    /// Guard flags of every choice this action records.
    pub fn choice_guards(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|c| match c {
            Consequence::RecordChoice { guard, .. } => Some(guard.as_str()),
            _ => None,
        })
    }
}

impl FromIterator<Consequence> for Consequences {
    fn from_iter<I: IntoIterator<Item = Consequence>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Consequences as authored: one object with optional keys.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConsequences {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    locks_location: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    records_choice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    choice_guard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    triggers_sequence: Option<SequenceId>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    ends_interaction: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    returns_to_intro: bool,
}

impl From<RawConsequences> for Consequences {
    fn from(raw: RawConsequences) -> Self {
        let mut consequences = Vec::new();

        if raw.locks_location {
            consequences.push(Consequence::LockLocation);
        }
        if let Some(key) = raw.records_choice {
            let guard = raw
                .choice_guard
                .unwrap_or_else(|| default_choice_guard(&key));
            consequences.push(Consequence::RecordChoice { key, guard });
        }
        if let Some(sequence) = raw.triggers_sequence {
            consequences.push(Consequence::TriggerSequence(sequence));
        }
        if raw.ends_interaction {
            consequences.push(Consequence::EndInteraction);
        }
        if raw.returns_to_intro {
            consequences.push(Consequence::ReturnToIntroduction);
        }

        Self(consequences)
    }
}

impl From<Consequences> for RawConsequences {
    fn from(consequences: Consequences) -> Self {
        let mut raw = RawConsequences::default();
        for consequence in consequences.0 {
            match consequence {
                Consequence::LockLocation => raw.locks_location = true,
                Consequence::RecordChoice { key, guard } => {
                    if guard != default_choice_guard(&key) {
                        raw.choice_guard = Some(guard);
                    }
                    raw.records_choice = Some(key);
                }
                Consequence::TriggerSequence(sequence) => raw.triggers_sequence = Some(sequence),
                Consequence::EndInteraction => raw.ends_interaction = true,
                Consequence::ReturnToIntroduction => raw.returns_to_intro = true,
            }
        }
        raw
    }
}

/// One of several mutually exclusive sub-choices of an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ActionId,
    pub text: String,
}

/// Something the player can do at a location.
///
/// Either a single button, or a prompt with a bundle of sub-choices that all
/// share this action's consequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: ActionId,
    pub text: String,

    #[serde(default, skip_serializing_if = "Consequences::is_empty")]
    pub consequences: Consequences,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
}

/// Id of the action synthesized when a sequence offers nothing else.
pub const LEAVE_ACTION_ID: &str = "leave_location";

impl Action {
    /// Create a plain button.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: ActionId::new(id),
            text: text.into(),
            consequences: Consequences::default(),
            choices: Vec::new(),
        }
    }

    /// The fallback "leave" button that returns to the introduction.
    pub fn leave() -> Self {
        Self::new(LEAVE_ACTION_ID, "Leave Location")
            .with_consequence(Consequence::ReturnToIntroduction)
    }

    pub fn with_consequence(mut self, consequence: Consequence) -> Self {
        self.consequences.0.push(consequence);
        self
    }

    pub fn with_choice(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.choices.push(Choice {
            id: ActionId::new(id),
            text: text.into(),
        });
        self
    }

    pub fn has_choices(&self) -> bool {
        !self.choices.is_empty()
    }

    /// Whether `id` selects this action or one of its sub-choices.
    pub fn answers_to(&self, id: &ActionId) -> bool {
        if self.has_choices() {
            self.choices.iter().any(|choice| &choice.id == id)
        } else {
            &self.id == id
        }
    }
}

/// A named sub-scene attached to a location, played by a `TriggerSequence`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updates: Option<StateUpdates>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

impl Sequence {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_updates(mut self, updates: StateUpdates) -> Self {
        self.updates = Some(updates);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }
}
