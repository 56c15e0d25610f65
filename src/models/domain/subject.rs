use std::{fmt, str::FromStr};

use async_graphql::Enum;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// A subject pool. Each one lives in its own collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize, Enum)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Aptitude,
    Logical,
    Verbal,
    Computer,
    Programming,
    Gk,
}

impl Subject {
    pub const ALL: [Subject; 6] = [
        Subject::Aptitude,
        Subject::Logical,
        Subject::Verbal,
        Subject::Computer,
        Subject::Programming,
        Subject::Gk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Aptitude => "aptitude",
            Subject::Logical => "logical",
            Subject::Verbal => "verbal",
            Subject::Computer => "computer",
            Subject::Programming => "programming",
            Subject::Gk => "gk",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Subject::Aptitude => "Aptitude",
            Subject::Logical => "Logical Reasoning",
            Subject::Verbal => "Verbal Ability",
            Subject::Computer => "Computer",
            Subject::Programming => "Programming",
            Subject::Gk => "General Knowledge",
        }
    }

    pub fn collection_name(&self) -> String {
        format!("{}_questions", self.as_str())
    }

    pub fn valid_identifiers() -> Vec<String> {
        Self::ALL.iter().map(|s| s.as_str().to_string()).collect()
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == normalized)
            .ok_or_else(|| AppError::InvalidSubject {
                subject: value.to_string(),
                valid: Self::valid_identifiers(),
            })
    }
}

/// Parse a list of raw identifiers, failing on the first unknown one.
pub fn parse_subjects<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Subject>, AppError> {
    raw.iter().map(|s| s.as_ref().parse()).collect()
}
