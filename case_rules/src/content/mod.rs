//! Content definitions - the read-only case book the engine consults.
//!
//! Content is authored as JSON and loaded once at startup. Nothing in here is
//! mutated during a session.

mod action;
mod address;
mod case;
mod condition;
mod loader;

pub use action::*;
pub use address::*;
pub use case::*;
pub use condition::*;
pub use loader::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::state::StateUpdates;

/// Clues ("letters") the player can circle on the case sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Clue {
    A,
    B,
    C,
}

impl Clue {
    /// The full alphabet, in display order.
    pub const ALL: [Clue; 3] = [Clue::A, Clue::B, Clue::C];

    pub fn letter(&self) -> char {
        match self {
            Clue::A => 'A',
            Clue::B => 'B',
            Clue::C => 'C',
        }
    }
}

impl std::fmt::Display for Clue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Identifier of a sequence attached to a location.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceId(pub String);

impl SequenceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SequenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a location decides its follow-up content after the base text.
///
/// Chosen once when the location is loaded: `conditions` wins over the
/// deprecated `conditionalText` list when both are authored.
#[derive(Debug, Clone, Default)]
pub enum Branching {
    /// Nested, short-circuiting condition tree.
    Conditions(Vec<Condition>),
    /// Flat, non-short-circuiting entries.
    Legacy(Vec<LegacyEntry>),
    /// Base text only.
    #[default]
    Plain,
}

/// A location in the case book.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawLocation")]
pub struct LocationDefinition {
    /// Base text shown on every visit.
    pub text: String,

    /// Clue granted unconditionally on visit.
    pub clue: Option<Clue>,

    /// Flag updates applied unconditionally on visit.
    pub updates: Option<StateUpdates>,

    pub branching: Branching,

    pub sequences: BTreeMap<SequenceId, Sequence>,
}

impl LocationDefinition {
    /// Create a location with base text only.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            clue: None,
            updates: None,
            branching: Branching::Plain,
            sequences: BTreeMap::new(),
        }
    }

    pub fn with_clue(mut self, clue: Clue) -> Self {
        self.clue = Some(clue);
        self
    }

    pub fn with_updates(mut self, updates: StateUpdates) -> Self {
        self.updates = Some(updates);
        self
    }

    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.branching = Branching::Conditions(conditions);
        self
    }

    pub fn with_legacy_entries(mut self, entries: Vec<LegacyEntry>) -> Self {
        self.branching = Branching::Legacy(entries);
        self
    }

    pub fn with_sequence(mut self, id: impl Into<String>, sequence: Sequence) -> Self {
        self.sequences.insert(SequenceId::new(id), sequence);
        self
    }

    /// Look up a sequence by id.
    pub fn sequence(&self, id: &SequenceId) -> Option<&Sequence> {
        self.sequences.get(id)
    }
}

/// Location as authored; both content schemas side by side.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLocation {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    base_text: Option<String>,
    #[serde(default)]
    circles_letter: Option<Clue>,
    #[serde(default)]
    updates_game_state: Option<StateUpdates>,
    #[serde(default)]
    conditions: Option<Vec<Condition>>,
    #[serde(default)]
    conditional_text: Option<Vec<LegacyEntry>>,
    #[serde(default)]
    sequences: BTreeMap<SequenceId, Sequence>,
}

impl From<RawLocation> for LocationDefinition {
    fn from(raw: RawLocation) -> Self {
        let branching = match (raw.conditions, raw.conditional_text) {
            (Some(conditions), _) => Branching::Conditions(conditions),
            (None, Some(entries)) => Branching::Legacy(entries),
            (None, None) => Branching::Plain,
        };

        Self {
            text: raw.text.or(raw.base_text).unwrap_or_default(),
            clue: raw.circles_letter,
            updates: raw.updates_game_state.filter(|u| !u.is_empty()),
            branching,
            sequences: raw.sequences,
        }
    }
}
