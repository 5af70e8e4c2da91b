//! Flag values and update bags - the open-ended narrative memory.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::content::Clue;

/// A value stored under a flag key.
///
/// Content authors write flags as plain JSON values, so the representation
/// is untagged. Lists and maps are stored as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<FlagValue>),
    Object(BTreeMap<String, FlagValue>),
}

impl FlagValue {
    /// Whether the value counts as "set" for a `flagSet` check.
    ///
    /// `Null`, `false`, zero, NaN and the empty string are falsy. Lists and
    /// maps are truthy even when empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            FlagValue::Null => false,
            FlagValue::Bool(b) => *b,
            FlagValue::Int(i) => *i != 0,
            FlagValue::Float(f) => *f != 0.0 && !f.is_nan(),
            FlagValue::String(s) => !s.is_empty(),
            FlagValue::Array(_) | FlagValue::Object(_) => true,
        }
    }

    /// The string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlagValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        FlagValue::Bool(value)
    }
}

impl From<i64> for FlagValue {
    fn from(value: i64) -> Self {
        FlagValue::Int(value)
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        FlagValue::String(value.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        FlagValue::String(value)
    }
}

impl std::fmt::Display for FlagValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlagValue::Null => write!(f, "null"),
            FlagValue::Bool(b) => write!(f, "{}", b),
            FlagValue::Int(i) => write!(f, "{}", i),
            FlagValue::Float(x) => write!(f, "{}", x),
            FlagValue::String(s) => write!(f, "{}", s),
            FlagValue::Array(_) | FlagValue::Object(_) => {
                let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

/// A flat bag of state updates attached to content.
///
/// The reserved key `circlesLetter` grants a clue; every other key overwrites
/// the flag of the same name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateUpdates {
    #[serde(rename = "circlesLetter", default, skip_serializing_if = "Option::is_none")]
    pub clue: Option<Clue>,

    #[serde(flatten)]
    pub flags: BTreeMap<String, FlagValue>,
}

impl StateUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flag overwrite.
    pub fn with_flag(mut self, key: impl Into<String>, value: impl Into<FlagValue>) -> Self {
        self.flags.insert(key.into(), value.into());
        self
    }

    /// Add a clue grant.
    pub fn with_clue(mut self, clue: Clue) -> Self {
        self.clue = Some(clue);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clue.is_none() && self.flags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!FlagValue::Null.is_truthy());
        assert!(!FlagValue::Bool(false).is_truthy());
        assert!(FlagValue::Bool(true).is_truthy());
        assert!(!FlagValue::Int(0).is_truthy());
        assert!(FlagValue::Int(-3).is_truthy());
        assert!(!FlagValue::Float(f64::NAN).is_truthy());
        assert!(FlagValue::Float(0.5).is_truthy());
        assert!(!FlagValue::from("").is_truthy());
        assert!(FlagValue::from("burn_footman_uniform").is_truthy());
    }

    #[test]
    fn test_untagged_json_values() {
        let values: Vec<FlagValue> =
            serde_json::from_str(r#"[true, 3, 1.5, "cook", null]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FlagValue::Bool(true),
                FlagValue::Int(3),
                FlagValue::Float(1.5),
                FlagValue::from("cook"),
                FlagValue::Null,
            ]
        );
    }

    #[test]
    fn test_list_and_map_values() {
        let updates: StateUpdates = serde_json::from_str(
            r#"{"suspects": ["cook", "warden"], "ledger": {"page": 12}, "empty": []}"#,
        )
        .unwrap();

        let suspects = &updates.flags["suspects"];
        assert_eq!(
            suspects,
            &FlagValue::Array(vec![FlagValue::from("cook"), FlagValue::from("warden")])
        );
        assert!(suspects.is_truthy());
        assert!(updates.flags["empty"].is_truthy());
        assert!(updates.flags["ledger"].is_truthy());
        assert_eq!(updates.flags["ledger"].to_string(), r#"{"page":12}"#);
        assert_eq!(suspects.to_string(), r#"["cook","warden"]"#);
    }

    #[test]
    fn test_updates_split_clue_from_flags() {
        let updates: StateUpdates =
            serde_json::from_str(r#"{"circlesLetter": "B", "foundKnife": true}"#).unwrap();

        assert_eq!(updates.clue, Some(Clue::B));
        assert_eq!(updates.flags.len(), 1);
        assert_eq!(updates.flags.get("foundKnife"), Some(&FlagValue::Bool(true)));
    }

    #[test]
    fn test_updates_builder() {
        let updates = StateUpdates::new()
            .with_flag("foundFruit", true)
            .with_clue(Clue::A);
        assert!(!updates.is_empty());
        assert!(StateUpdates::new().is_empty());
    }
}
