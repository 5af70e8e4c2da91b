//! Score Calculator.
//!
//! [`calculate_score`] is a pure function of the final flags and the number of
//! leads followed. Every objective is reported, hit or miss, so the breakdown
//! always has one entry per objective in table order.

use std::collections::BTreeMap;

use case_rules::{
    ActionId, CaseMetadata, FlagValue, Objective, Rating, Requirement, ScoringRules,
};
use serde::{Deserialize, Serialize};

/// How one objective turned out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveOutcome {
    Achieved { points: i64 },
    Missed { possible: i64 },
    /// The right choice was made without the clue that justifies it.
    MissingClue { possible: i64 },
    /// A different choice was made; `chosen` names the item.
    WrongChoice { chosen: String, possible: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub label: String,
    pub outcome: ObjectiveOutcome,
}

impl ScoreEntry {
    /// Points awarded by this entry.
    pub fn points(&self) -> i64 {
        match self.outcome {
            ObjectiveOutcome::Achieved { points } => points,
            _ => 0,
        }
    }

    pub fn is_achieved(&self) -> bool {
        matches!(self.outcome, ObjectiveOutcome::Achieved { .. })
    }
}

impl std::fmt::Display for ScoreEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.outcome {
            ObjectiveOutcome::Achieved { points } => write!(f, "{}: +{points} points", self.label),
            ObjectiveOutcome::Missed { possible } => {
                write!(f, "Missed: {} (+{possible} points possible)", self.label)
            }
            ObjectiveOutcome::MissingClue { possible } => write!(
                f,
                "{}: right choice but missed the clue (+{possible} points possible if clue found)",
                self.label
            ),
            ObjectiveOutcome::WrongChoice { chosen, possible } => write!(
                f,
                "{}: chose incorrect item ({chosen}): +0 points (+{possible} points possible with clue)",
                self.label
            ),
        }
    }
}

/// Deduction for leads beyond the free allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadPenalty {
    pub leads_followed: u32,
    pub free_leads: u32,
    pub extra_leads: u32,
    pub per_lead: i64,
    /// Points deducted, never negative.
    pub total: i64,
}

impl LeadPenalty {
    pub fn new(leads_followed: u32, free_leads: u32, per_lead: i64) -> Self {
        let extra_leads = leads_followed.saturating_sub(free_leads);
        Self {
            leads_followed,
            free_leads,
            extra_leads,
            per_lead,
            total: i64::from(extra_leads) * per_lead,
        }
    }
}

impl std::fmt::Display for LeadPenalty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.extra_leads > 0 {
            write!(
                f,
                "Leads penalty: {} extra leads (>{}) x {} points = -{} points",
                self.extra_leads, self.free_leads, self.per_lead, self.total
            )
        } else {
            write!(
                f,
                "Leads used: {} (within {} limit): no penalty",
                self.leads_followed, self.free_leads
            )
        }
    }
}

/// The solution narrative and the master's reference run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseConclusion {
    pub outro: Option<String>,
    pub case_description: Option<String>,
    pub master_leads: Vec<String>,
    pub master_score: i64,
}

impl CaseConclusion {
    pub fn new(metadata: &CaseMetadata, master_score: i64) -> Self {
        let summary = metadata.case_summary.as_ref();
        Self {
            outro: metadata.outro.clone(),
            case_description: summary.and_then(|s| s.case_description.clone()),
            master_leads: summary
                .map(|s| s.leads.iter().map(|lead| lead.name.clone()).collect())
                .unwrap_or_default(),
            master_score,
        }
    }
}

/// The full score screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub entries: Vec<ScoreEntry>,
    pub lead_penalty: LeadPenalty,
    /// Awarded points minus the lead penalty; may be negative.
    pub total: i64,
    pub rating: Rating,
    pub leads_followed: u32,
    pub conclusion: Option<CaseConclusion>,
}

impl ScoreReport {
    pub fn with_conclusion(mut self, conclusion: CaseConclusion) -> Self {
        self.conclusion = Some(conclusion);
        self
    }
}

/// Score a finished session.
pub fn calculate_score(
    flags: &BTreeMap<String, FlagValue>,
    leads_followed: u32,
    rules: &ScoringRules,
) -> ScoreReport {
    let entries: Vec<ScoreEntry> = rules
        .objectives
        .iter()
        .map(|objective| ScoreEntry {
            label: objective.label.clone(),
            outcome: judge(objective, flags),
        })
        .collect();

    let lead_penalty = LeadPenalty::new(leads_followed, rules.free_leads, rules.penalty_per_extra_lead);
    let awarded: i64 = entries.iter().map(ScoreEntry::points).sum();
    let total = awarded - lead_penalty.total;

    ScoreReport {
        entries,
        lead_penalty,
        total,
        rating: rules.rating_scale.rate(total),
        leads_followed,
        conclusion: None,
    }
}

fn judge(objective: &Objective, flags: &BTreeMap<String, FlagValue>) -> ObjectiveOutcome {
    let is_set = |key: &str| flags.get(key).is_some_and(FlagValue::is_truthy);
    let possible = objective.points;

    match &objective.requirement {
        Requirement::FlagSet { flag } => {
            if is_set(flag) {
                ObjectiveOutcome::Achieved { points: possible }
            } else {
                ObjectiveOutcome::Missed { possible }
            }
        }
        Requirement::ChoiceWithClue {
            choice_flag,
            expected,
            clue_flag,
        } => match flags.get(choice_flag).filter(|value| value.is_truthy()) {
            None => ObjectiveOutcome::Missed { possible },
            Some(value) if value.as_str() == Some(expected.as_str()) => {
                if is_set(clue_flag) {
                    ObjectiveOutcome::Achieved { points: possible }
                } else {
                    ObjectiveOutcome::MissingClue { possible }
                }
            }
            Some(value) => ObjectiveOutcome::WrongChoice {
                chosen: item_name(value),
                possible,
            },
        },
    }
}

fn item_name(value: &FlagValue) -> String {
    let raw = value.to_string();
    ActionId::new(raw.clone())
        .describe()
        .map(|(_, item)| item)
        .unwrap_or(raw)
}
