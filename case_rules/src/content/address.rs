//! Location addresses - the "28 WC" style identifiers of the case map.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use thiserror::Error;

/// District codes in the order they appear in the location directory.
pub const DISTRICT_ORDER: [&str; 8] = ["WC", "SW", "NW", "N", "EC", "E", "SE", "S"];

/// Errors produced when parsing a location address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseError {
    #[error("address is empty")]
    Empty,

    #[error("address {0:?} has no district")]
    MissingDistrict(String),

    #[error("address {0:?} does not start with a street number")]
    InvalidNumber(String),

    #[error("address {0:?} has an invalid district code")]
    InvalidDistrict(String),
}

/// A street number plus district code, e.g. `28 WC`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocationAddress {
    number: u32,
    district: String,
}

impl LocationAddress {
    /// Create an address from its parts. The district is upper-cased.
    pub fn new(number: u32, district: impl Into<String>) -> Self {
        Self {
            number,
            district: district.into().to_ascii_uppercase(),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn district(&self) -> &str {
        &self.district
    }

    /// Position of the district in [`DISTRICT_ORDER`]; unknown districts sort last.
    pub fn district_rank(&self) -> usize {
        DISTRICT_ORDER
            .iter()
            .position(|d| *d == self.district)
            .unwrap_or(DISTRICT_ORDER.len())
    }
}

impl FromStr for LocationAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AddressParseError::Empty);
        }

        let mut parts = trimmed.split_whitespace();
        let number = parts.next().unwrap_or_default();
        let district = match (parts.next(), parts.next()) {
            (Some(district), None) => district,
            (None, _) => return Err(AddressParseError::MissingDistrict(trimmed.to_string())),
            (Some(_), Some(_)) => return Err(AddressParseError::InvalidDistrict(trimmed.to_string())),
        };

        let number = number
            .parse::<u32>()
            .map_err(|_| AddressParseError::InvalidNumber(trimmed.to_string()))?;

        if !district.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AddressParseError::InvalidDistrict(trimmed.to_string()));
        }

        Ok(Self::new(number, district))
    }
}

impl TryFrom<String> for LocationAddress {
    type Error = AddressParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LocationAddress> for String {
    fn from(address: LocationAddress) -> Self {
        address.to_string()
    }
}

impl std::fmt::Display for LocationAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.number, self.district)
    }
}

impl PartialOrd for LocationAddress {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Directory order: known districts first, then by code, then numerically.
impl Ord for LocationAddress {
    fn cmp(&self, other: &Self) -> Ordering {
        self.district_rank()
            .cmp(&other.district_rank())
            .then_with(|| self.district.cmp(&other.district))
            .then_with(|| self.number.cmp(&other.number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        let address: LocationAddress = "28 WC".parse().unwrap();
        assert_eq!(address.number(), 28);
        assert_eq!(address.district(), "WC");
        assert_eq!(address.to_string(), "28 WC");
    }

    #[test]
    fn test_parse_normalizes_district_case() {
        let address: LocationAddress = "  4 sw ".parse().unwrap();
        assert_eq!(address, LocationAddress::new(4, "SW"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<LocationAddress>(), Err(AddressParseError::Empty));
        assert!(matches!(
            "28".parse::<LocationAddress>(),
            Err(AddressParseError::MissingDistrict(_))
        ));
        assert!(matches!(
            "WC 28".parse::<LocationAddress>(),
            Err(AddressParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            "28 W1".parse::<LocationAddress>(),
            Err(AddressParseError::InvalidDistrict(_))
        ));
    }

    #[test]
    fn test_directory_ordering() {
        let mut addresses: Vec<LocationAddress> = ["86 SW", "68 WC", "4 SW", "28 WC", "3 ZZ", "12 N"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        addresses.sort();

        let rendered: Vec<String> = addresses.iter().map(|a| a.to_string()).collect();
        assert_eq!(rendered, vec!["28 WC", "68 WC", "4 SW", "86 SW", "12 N", "3 ZZ"]);
    }

    #[test]
    fn test_serde_as_string() {
        let address = LocationAddress::new(52, "SW");
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, "\"52 SW\"");

        let back: LocationAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
