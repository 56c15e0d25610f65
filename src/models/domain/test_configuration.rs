use std::collections::HashSet;

use async_graphql::{Enum, InputObject, SimpleObject};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::subject::Subject;

pub const SECONDS_PER_QUESTION: u32 = 45;
pub const ALLOWED_QUESTION_COUNTS: [u32; 4] = [20, 30, 50, 100];

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9][0-9 \-]{5,18}[0-9]$").expect("PHONE_REGEX is a valid regex pattern")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "kebab-case")]
pub enum TestMode {
    #[serde(alias = "specific")]
    SingleSubject,
    Combined,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate, SimpleObject, InputObject)]
#[graphql(input_name = "CandidateInput")]
pub struct CandidateDetails {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    pub phone: Option<String>,
}

/// What the candidate asked for. Frozen once a session starts.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct TestConfiguration {
    pub mode: TestMode,
    pub subjects: Vec<Subject>,
    pub question_count: u32,
    pub candidate: Option<CandidateDetails>,
}

impl TestConfiguration {
    pub fn new(mode: TestMode, subjects: Vec<Subject>, question_count: u32) -> Self {
        Self {
            mode,
            subjects,
            question_count,
            candidate: None,
        }
    }

    pub fn with_candidate(mut self, candidate: CandidateDetails) -> Self {
        self.candidate = Some(candidate);
        self
    }

    /// Time allowed for the whole test, in seconds.
    pub fn duration_seconds(&self) -> u32 {
        self.question_count * SECONDS_PER_QUESTION
    }

    /// Checks everything the sampler relies on: subject count per mode,
    /// distinct subjects and a positive target count.
    pub fn validate(&self) -> AppResult<()> {
        if self.question_count == 0 {
            return Err(AppError::InvalidConfiguration(
                "Question count must be at least 1".to_string(),
            ));
        }

        let distinct: HashSet<&Subject> = self.subjects.iter().collect();
        if distinct.len() != self.subjects.len() {
            return Err(AppError::InvalidConfiguration(
                "Each subject may only be selected once".to_string(),
            ));
        }

        match self.mode {
            TestMode::SingleSubject if self.subjects.is_empty() => {
                Err(AppError::InvalidConfiguration(
                    "Please select at least one subject".to_string(),
                ))
            }
            TestMode::Combined if self.subjects.len() < 2 => Err(AppError::InvalidConfiguration(
                "Please select at least two subjects for combined test".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Stricter checks applied before a timed session may start.
    pub fn validate_for_session(&self) -> AppResult<()> {
        self.validate()?;

        if !ALLOWED_QUESTION_COUNTS.contains(&self.question_count) {
            return Err(AppError::InvalidConfiguration(format!(
                "Question count must be one of {:?}",
                ALLOWED_QUESTION_COUNTS
            )));
        }

        let candidate = self.candidate.as_ref().ok_or_else(|| {
            AppError::InvalidConfiguration("Please enter your name".to_string())
        })?;

        if candidate.name.trim().is_empty() {
            return Err(AppError::InvalidConfiguration(
                "Please enter your name".to_string(),
            ));
        }

        candidate
            .validate()
            .map_err(|e| AppError::InvalidConfiguration(e.to_string()))
    }
}
