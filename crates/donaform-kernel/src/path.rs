//! Field paths: dotted/indexed identifiers locating a value in the form.
//!
//! Canonical spelling is bracketed (`donations[1].percentage`). Dotted
//! indices (`donations.1.percentage`) and the `termsAccepted` alias are
//! accepted on input and normalised.

use crate::error::FormError;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static ENTRY_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^donations(?:\[(\d+)\]|\.(\d+))(?:\.(institution|percentage))?$")
        .expect("entry path pattern compiles")
});

/// Location of one value in [`crate::FormValues`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldPath {
    FullName,
    DonationsAmount,
    TermsAndCondition,
    /// The donations list as a whole; also carries the aggregate sum error.
    Donations,
    Entry(usize),
    Institution(usize),
    Percentage(usize),
}

impl FieldPath {
    /// Entry index addressed by this path, if any.
    pub fn entry_index(&self) -> Option<usize> {
        match self {
            Self::Entry(i) | Self::Institution(i) | Self::Percentage(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullName => write!(f, "fullName"),
            Self::DonationsAmount => write!(f, "donationsAmount"),
            Self::TermsAndCondition => write!(f, "termsAndCondition"),
            Self::Donations => write!(f, "donations"),
            Self::Entry(i) => write!(f, "donations[{i}]"),
            Self::Institution(i) => write!(f, "donations[{i}].institution"),
            Self::Percentage(i) => write!(f, "donations[{i}].percentage"),
        }
    }
}

impl FromStr for FieldPath {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fullName" => return Ok(Self::FullName),
            "donationsAmount" => return Ok(Self::DonationsAmount),
            "termsAndCondition" | "termsAccepted" => return Ok(Self::TermsAndCondition),
            "donations" => return Ok(Self::Donations),
            _ => {}
        }

        let caps = ENTRY_PATH
            .captures(s.trim())
            .ok_or_else(|| FormError::InvalidPath(s.to_string()))?;
        let index = caps
            .get(1)
            .or_else(|| caps.get(2))
            .and_then(|m| m.as_str().parse::<usize>().ok())
            .ok_or_else(|| FormError::InvalidPath(s.to_string()))?;

        Ok(match caps.get(3).map(|m| m.as_str()) {
            Some("institution") => Self::Institution(index),
            Some("percentage") => Self::Percentage(index),
            _ => Self::Entry(index),
        })
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalar_fields() {
        assert_eq!("fullName".parse::<FieldPath>(), Ok(FieldPath::FullName));
        assert_eq!(
            "donationsAmount".parse::<FieldPath>(),
            Ok(FieldPath::DonationsAmount)
        );
        assert_eq!(
            "termsAccepted".parse::<FieldPath>(),
            Ok(FieldPath::TermsAndCondition)
        );
    }

    #[test]
    fn parses_bracketed_and_dotted_indices() {
        assert_eq!(
            "donations[1].percentage".parse::<FieldPath>(),
            Ok(FieldPath::Percentage(1))
        );
        assert_eq!(
            "donations.2.institution".parse::<FieldPath>(),
            Ok(FieldPath::Institution(2))
        );
        assert_eq!("donations[0]".parse::<FieldPath>(), Ok(FieldPath::Entry(0)));
    }

    #[test]
    fn display_is_canonical() {
        let path: FieldPath = "donations.3.percentage".parse().expect("path parses");
        assert_eq!(path.to_string(), "donations[3].percentage");
        assert_eq!(
            FieldPath::TermsAndCondition.to_string(),
            "termsAndCondition"
        );
    }

    #[test]
    fn rejects_unknown_paths() {
        for raw in ["", "email", "donations[x]", "donations[0].amount", "donations[]"] {
            assert_eq!(
                raw.parse::<FieldPath>(),
                Err(FormError::InvalidPath(raw.to_string())),
                "{raw} should be rejected"
            );
        }
    }
}
