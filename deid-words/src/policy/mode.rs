//! Policy modes and their persisted markers.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// First line of a saved allow-list policy.
pub const ALLOWED_WORDS_MARKER: &str = "using_allowed_words_strategy";

/// First line of a saved forbid-list policy.
pub const FORBIDDEN_WORDS_MARKER: &str = "using_forbidden_words_strategy";

/// Which word list decides a query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyMode {
    /// Only listed words are allowed.
    Allow,
    /// Every word is allowed except listed ones.
    Forbid,
}

impl PolicyMode {
    /// The marker written as the first line of a saved policy.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::Allow => ALLOWED_WORDS_MARKER,
            Self::Forbid => FORBIDDEN_WORDS_MARKER,
        }
    }

    /// Recognizes a marker line. The match is exact.
    #[must_use]
    pub fn from_marker(line: &str) -> Option<Self> {
        match line {
            ALLOWED_WORDS_MARKER => Some(Self::Allow),
            FORBIDDEN_WORDS_MARKER => Some(Self::Forbid),
            _ => None,
        }
    }

    /// Short lowercase name, as used in logs and JSON.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Forbid => "forbid",
        }
    }
}

impl fmt::Display for PolicyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyMode {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_marker(s).ok_or_else(|| PolicyError::format(Some(s)))
    }
}
