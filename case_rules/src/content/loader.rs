//! Loading the case book from a content directory.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::{AddressParseError, CaseMetadata, Credits, LocationAddress, LocationDefinition, Questions};

pub const LOCATIONS_FILE: &str = "locations.json";
pub const CASE_FILE: &str = "caseIntro.json";
pub const CREDITS_FILE: &str = "credit.json";
pub const QUESTIONS_FILE: &str = "questions.json";

/// Errors that make content unusable. Fatal to session start.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {document}: {source}")]
    Json {
        document: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid location address {address:?}: {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: AddressParseError,
    },

    #[error("location {address} is defined twice (as {first:?} and {second:?})")]
    DuplicateAddress {
        address: LocationAddress,
        first: String,
        second: String,
    },

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),
}

/// The read-only content repository for one case.
#[derive(Debug, Clone)]
pub struct CaseContent {
    locations: BTreeMap<LocationAddress, LocationDefinition>,
    pub metadata: CaseMetadata,
    pub credits: Option<Credits>,
    pub questions: Option<Questions>,
}

impl CaseContent {
    /// Create content from already-parsed parts.
    pub fn new(metadata: CaseMetadata) -> Self {
        Self {
            locations: BTreeMap::new(),
            metadata,
            credits: None,
            questions: None,
        }
    }

    /// Add a location.
    pub fn with_location(mut self, address: LocationAddress, location: LocationDefinition) -> Self {
        self.locations.insert(address, location);
        self
    }

    pub fn with_credits(mut self, credits: Credits) -> Self {
        self.credits = Some(credits);
        self
    }

    pub fn with_questions(mut self, questions: Questions) -> Self {
        self.questions = Some(questions);
        self
    }

    /// Parse the two mandatory documents.
    pub fn from_json(locations_json: &str, case_json: &str) -> Result<Self, ContentError> {
        let raw: BTreeMap<String, LocationDefinition> = parse_json(LOCATIONS_FILE, locations_json)?;
        let metadata: CaseMetadata = parse_json(CASE_FILE, case_json)?;

        let mut content = Self::new(metadata);
        let mut keys: BTreeMap<LocationAddress, String> = BTreeMap::new();
        for (address, location) in raw {
            let parsed = address
                .parse::<LocationAddress>()
                .map_err(|source| ContentError::InvalidAddress {
                    address: address.clone(),
                    source,
                })?;
            if let Some(first) = keys.insert(parsed.clone(), address.clone()) {
                return Err(ContentError::DuplicateAddress {
                    address: parsed,
                    first,
                    second: address,
                });
            }
            content.locations.insert(parsed, location);
        }

        Ok(content)
    }

    /// Load a content directory.
    ///
    /// `locations.json` and `caseIntro.json` are required; `credit.json` and
    /// `questions.json` are optional but must parse when present.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, ContentError> {
        let dir = dir.as_ref();

        let locations_json = read_file(&dir.join(LOCATIONS_FILE))?;
        let case_json = read_file(&dir.join(CASE_FILE))?;
        let mut content = Self::from_json(&locations_json, &case_json)?;

        if let Some(json) = read_optional_file(&dir.join(CREDITS_FILE))? {
            content.credits = Some(parse_json(CREDITS_FILE, &json)?);
        }
        if let Some(json) = read_optional_file(&dir.join(QUESTIONS_FILE))? {
            content.questions = Some(parse_json(QUESTIONS_FILE, &json)?);
        }

        Ok(content)
    }

    /// Get a location definition by address.
    pub fn location(&self, address: &LocationAddress) -> Option<&LocationDefinition> {
        self.locations.get(address)
    }

    /// All addresses in directory order.
    pub fn addresses(&self) -> impl Iterator<Item = &LocationAddress> {
        self.locations.keys()
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Addresses grouped by district, districts and numbers in directory order.
    pub fn addresses_by_district(&self) -> Vec<(&str, Vec<&LocationAddress>)> {
        let mut groups: Vec<(&str, Vec<&LocationAddress>)> = Vec::new();

        for address in self.locations.keys() {
            match groups.last_mut() {
                Some((district, members)) if *district == address.district() => {
                    members.push(address)
                }
                _ => groups.push((address.district(), vec![address])),
            }
        }

        groups
    }
}

fn parse_json<T: DeserializeOwned>(document: &str, json: &str) -> Result<T, ContentError> {
    serde_json::from_str(json).map_err(|source| ContentError::Json {
        document: document.to_string(),
        source,
    })
}

pub(crate) fn read_file(path: &Path) -> Result<String, ContentError> {
    std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_optional_file(path: &Path) -> Result<Option<String>, ContentError> {
    match std::fs::read_to_string(path) {
        Ok(json) => Ok(Some(json)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ContentError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
