#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Precision classification of a curated mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Equivalence {
    Equal,
    Wider,
    Narrower,
    Unmatched,
}

impl Equivalence {
    pub const ALL: [Equivalence; 4] = [
        Equivalence::Equal,
        Equivalence::Wider,
        Equivalence::Narrower,
        Equivalence::Unmatched,
    ];

    /// The submission-value spelling used in curated mapping tables.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "EQUAL",
            Self::Wider => "WIDER",
            Self::Narrower => "NARROWER",
            Self::Unmatched => "UNMATCHED",
        }
    }
}

impl FromStr for Equivalence {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "EQUAL" => Ok(Self::Equal),
            "WIDER" => Ok(Self::Wider),
            "NARROWER" => Ok(Self::Narrower),
            "UNMATCHED" => Ok(Self::Unmatched),
            other => Err(ModelError::InvalidEquivalence(other.to_string())),
        }
    }
}

impl fmt::Display for Equivalence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
