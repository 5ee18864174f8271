//! Languages the article catalog is maintained in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Language tag of a catalog entry, stored as its lowercase ISO 639-1 code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailableLanguages {
    De,
    En,
}

impl AvailableLanguages {
    pub const ALL: [AvailableLanguages; 2] = [AvailableLanguages::De, AvailableLanguages::En];

    /// The code stored in the `articles.language` column.
    pub fn as_str(self) -> &'static str {
        match self {
            AvailableLanguages::De => "de",
            AvailableLanguages::En => "en",
        }
    }
}

impl fmt::Display for AvailableLanguages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvailableLanguages {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown language '{s}'")))
    }
}
