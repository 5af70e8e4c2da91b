//! Scoring tables: objectives, lead penalty, and the rating scale.
//!
//! The defaults reproduce the point table of the published case. Every value
//! can be overridden from the `[scoring]` table of the config file.

use serde::{Deserialize, Serialize};

/// What must be true in the final flags for an objective to score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Requirement {
    /// A single flag must be truthy.
    FlagSet { flag: String },

    /// A recorded choice must equal `expected` AND `clue_flag` must be truthy.
    ChoiceWithClue {
        choice_flag: String,
        expected: String,
        clue_flag: String,
    },
}

/// A scoring objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    /// Imperative description, e.g. "Acquire Knife (28 WC)".
    pub label: String,
    pub points: i64,
    pub requirement: Requirement,
}

impl Objective {
    pub fn flag_set(label: impl Into<String>, points: i64, flag: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            points,
            requirement: Requirement::FlagSet { flag: flag.into() },
        }
    }
}

/// Player ratings, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    SurpassedMaster,
    Excellent,
    Good,
    Okay,
    Tried,
}

impl Rating {
    pub fn label(&self) -> &'static str {
        match self {
            Rating::SurpassedMaster => "You surpassed the master!",
            Rating::Excellent => "Excellent!",
            Rating::Good => "Good!",
            Rating::Okay => "Okay.",
            Rating::Tried => "At least you tried.",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Minimum score for each rating above [`Rating::Tried`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingScale {
    pub surpassed_master: i64,
    pub excellent: i64,
    pub good: i64,
    pub okay: i64,
}

impl Default for RatingScale {
    fn default() -> Self {
        Self {
            surpassed_master: 105,
            excellent: 75,
            good: 35,
            okay: 5,
        }
    }
}

impl RatingScale {
    /// Step function from score to rating.
    pub fn rate(&self, score: i64) -> Rating {
        if score >= self.surpassed_master {
            Rating::SurpassedMaster
        } else if score >= self.excellent {
            Rating::Excellent
        } else if score >= self.good {
            Rating::Good
        } else if score >= self.okay {
            Rating::Okay
        } else {
            Rating::Tried
        }
    }
}

/// The complete point table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    pub objectives: Vec<Objective>,

    /// Leads followed without penalty.
    pub free_leads: u32,

    /// Points deducted per lead beyond `free_leads`.
    pub penalty_per_extra_lead: i64,

    pub rating_scale: RatingScale,

    /// The master detective's score, shown for comparison.
    pub master_score: i64,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            objectives: vec![
                Objective::flag_set("Visit Colonial Institute (86 SW)", 15, "visitedColonialInstitute"),
                Objective::flag_set("Visit Haymarket Theatre (4 SW)", 15, "confirmedMotiveLocation"),
                Objective::flag_set(
                    "Understand Motive (Revenge, via 4 SW visit)",
                    30,
                    "confirmedMotiveLocation",
                ),
                Objective::flag_set("Acquire Rotten Fruit (28 WC)", 20, "foundFruit"),
                Objective::flag_set("Acquire Knife (28 WC)", 20, "foundKnife"),
                Objective::flag_set("Burn Wig and Moustache (68 WC)", 20, "destroyedWigMoustache"),
                Objective {
                    label: "Burn correct Uniform (Footman's)".to_string(),
                    points: 20,
                    requirement: Requirement::ChoiceWithClue {
                        choice_flag: "item_burned_68wc".to_string(),
                        expected: "burn_footman_uniform".to_string(),
                        clue_flag: "confirmedFootmanUniformMissing".to_string(),
                    },
                },
            ],
            free_leads: 5,
            penalty_per_extra_lead: 5,
            rating_scale: RatingScale::default(),
            master_score: 100,
        }
    }
}

impl ScoringRules {
    /// Sum of all objective points.
    pub fn max_points(&self) -> i64 {
        self.objectives.iter().map(|o| o.points).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_boundaries() {
        let scale = RatingScale::default();
        let cases = [
            (105, "You surpassed the master!"),
            (104, "Excellent!"),
            (75, "Excellent!"),
            (74, "Good!"),
            (35, "Good!"),
            (34, "Okay."),
            (5, "Okay."),
            (4, "At least you tried."),
            (0, "At least you tried."),
            (-20, "At least you tried."),
        ];

        for (score, expected) in cases {
            assert_eq!(scale.rate(score).label(), expected, "score {}", score);
        }
    }

    #[test]
    fn test_default_table_totals() {
        let rules = ScoringRules::default();
        assert_eq!(rules.objectives.len(), 7);
        assert_eq!(rules.max_points(), 140);
        assert_eq!(rules.free_leads, 5);
        assert_eq!(rules.penalty_per_extra_lead, 5);
    }

    #[test]
    fn test_rules_from_toml() {
        let rules: ScoringRules = toml::from_str(
            r#"
            free_leads = 3
            penalty_per_extra_lead = 10

            [rating_scale]
            excellent = 60

            [[objectives]]
            label = "Find the ledger"
            points = 40
            requirement = { kind = "flag_set", flag = "foundLedger" }
            "#,
        )
        .unwrap();

        assert_eq!(rules.free_leads, 3);
        assert_eq!(rules.objectives.len(), 1);
        assert_eq!(rules.rating_scale.excellent, 60);
        assert_eq!(rules.rating_scale.surpassed_master, 105);
        assert_eq!(rules.master_score, 100);
    }
}
