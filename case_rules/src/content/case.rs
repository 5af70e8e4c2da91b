//! Case-level documents: introduction, conclusion, credits, questions.

use serde::{Deserialize, Serialize};

/// Case metadata from `caseIntro.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseMetadata {
    #[serde(rename = "case title", default)]
    pub title: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    /// Introduction shown at session start and when returning from a location.
    pub intro: String,

    /// Solution narrative shown with the score.
    #[serde(default)]
    pub outro: Option<String>,

    #[serde(default)]
    pub case_summary: Option<CaseSummary>,
}

/// The master detective's own solution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseSummary {
    #[serde(default)]
    pub case_description: Option<String>,

    /// Leads the master followed, in order.
    #[serde(default)]
    pub leads: Vec<MasterLead>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterLead {
    pub name: String,
}

/// Credits document (`credit.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub case_writer: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub illustrators: Vec<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub distributor: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub website_creator: Option<WebsiteCreator>,
}

/// Credit for the adaptation of the case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebsiteCreator {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub discord: Option<String>,
}

/// Questions document (`questions.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Questions {
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub number: u32,
    pub question: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_metadata_parse() {
        let metadata: CaseMetadata = serde_json::from_str(
            r#"{
                "case title": "The Tin Soldier",
                "date": "14th March 1889",
                "intro": "Holmes was reading the paper.\nWatson arrived.",
                "outro": "It was revenge all along.",
                "case_summary": {
                    "case_description": "Holmes went straight to the theatre.",
                    "leads": [{ "name": "4 SW" }, { "name": "28 WC" }]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(metadata.title.as_deref(), Some("The Tin Soldier"));
        let summary = metadata.case_summary.unwrap();
        assert_eq!(summary.leads.len(), 2);
        assert_eq!(summary.leads[0].name, "4 SW");
    }

    #[test]
    fn test_intro_is_required() {
        let result = serde_json::from_str::<CaseMetadata>(r#"{ "outro": "The end." }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_credits_parse_partial() {
        let credits: Credits = serde_json::from_str(
            r#"{ "authors": ["Jane", "Ray"], "website_creator": { "name": "Sam" } }"#,
        )
        .unwrap();

        assert_eq!(credits.authors, vec!["Jane", "Ray"]);
        assert!(credits.case_writer.is_none());
        assert_eq!(
            credits.website_creator.and_then(|w| w.name).as_deref(),
            Some("Sam")
        );
    }
}
