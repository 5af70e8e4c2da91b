//! Session state - the single mutable aggregate for one play-through.
//!
//! `visited` and `locked` only ever grow: the type exposes no way to remove
//! from them. `leads_followed` is bumped exactly when an address is visited
//! for the first time, so it always equals the size of `visited`.

mod flags;

pub use flags::*;

use std::collections::{BTreeMap, BTreeSet};

use crate::content::{Clue, LocationAddress};

/// The complete state of a case session at any point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseState {
    visited: BTreeSet<LocationAddress>,
    clues: BTreeSet<Clue>,
    flags: BTreeMap<String, FlagValue>,
    locked: BTreeSet<LocationAddress>,
    current_location: Option<LocationAddress>,
    leads_followed: u32,
}

impl CaseState {
    /// Create a fresh session state (everything empty, zero leads).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> &BTreeSet<LocationAddress> {
        &self.visited
    }

    pub fn clues(&self) -> &BTreeSet<Clue> {
        &self.clues
    }

    pub fn flags(&self) -> &BTreeMap<String, FlagValue> {
        &self.flags
    }

    pub fn locked_locations(&self) -> &BTreeSet<LocationAddress> {
        &self.locked
    }

    pub fn current_location(&self) -> Option<&LocationAddress> {
        self.current_location.as_ref()
    }

    pub fn leads_followed(&self) -> u32 {
        self.leads_followed
    }

    pub fn is_visited(&self, address: &LocationAddress) -> bool {
        self.visited.contains(address)
    }

    pub fn is_locked(&self, address: &LocationAddress) -> bool {
        self.locked.contains(address)
    }

    pub fn holds_clue(&self, clue: Clue) -> bool {
        self.clues.contains(&clue)
    }

    /// Get a flag value by key.
    pub fn flag(&self, key: &str) -> Option<&FlagValue> {
        self.flags.get(key)
    }

    /// Check whether a flag is present and truthy.
    pub fn flag_is_set(&self, key: &str) -> bool {
        self.flags.get(key).is_some_and(FlagValue::is_truthy)
    }

    /// Make `address` the current location.
    ///
    /// Returns `false` without touching state if the address is locked.
    pub fn enter_location(&mut self, address: &LocationAddress) -> bool {
        if self.is_locked(address) {
            return false;
        }
        self.current_location = Some(address.clone());
        true
    }

    /// Move to a no-location screen (intro, credits, questions).
    pub fn leave_location(&mut self) {
        self.current_location = None;
    }

    /// Record a visit. Returns `true` (and counts a lead) only on the first visit.
    pub fn record_visit(&mut self, address: &LocationAddress) -> bool {
        if !self.visited.insert(address.clone()) {
            return false;
        }
        self.leads_followed += 1;
        true
    }

    /// Add a clue. Returns `true` if the clue was newly collected.
    pub fn grant_clue(&mut self, clue: Clue) -> bool {
        self.clues.insert(clue)
    }

    /// Set a flag, overwriting any previous value.
    pub fn set_flag(&mut self, key: impl Into<String>, value: impl Into<FlagValue>) {
        self.flags.insert(key.into(), value.into());
    }

    /// Lock an address. Returns `true` if it was not locked before.
    pub fn lock_location(&mut self, address: &LocationAddress) -> bool {
        self.locked.insert(address.clone())
    }

    /// Merge an update bag: flags overwrite, the clue grant is idempotent.
    ///
    /// Returns the clue if it was newly collected by this call.
    pub fn apply_updates(&mut self, updates: &StateUpdates) -> Option<Clue> {
        for (key, value) in &updates.flags {
            self.flags.insert(key.clone(), value.clone());
        }

        updates.clue.filter(|clue| self.grant_clue(*clue))
    }
}
