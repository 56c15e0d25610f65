use std::collections::HashMap;

use async_graphql::Enum;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::errors::{AppError, AppResult};
use crate::models::domain::question::{OptionLabel, Question};
use crate::models::domain::test_configuration::TestConfiguration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "kebab-case")]
pub enum SessionState {
    Configuring,
    InProgress,
    Submitted,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Configuring => write!(f, "configuring"),
            SessionState::InProgress => write!(f, "in-progress"),
            SessionState::Submitted => write!(f, "submitted"),
        }
    }
}

/// What a single countdown tick did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// One second was taken off; this many remain.
    Running(u32),
    /// The clock hit zero and the session was submitted by this tick.
    Expired,
    /// Not in progress, or the tick came from a driver of an earlier epoch.
    Ignored,
}

/// One test attempt. Transitions are synchronous; the caller owns timing.
#[derive(Clone, Debug)]
pub struct AssessmentSession {
    state: SessionState,
    configuration: Option<TestConfiguration>,
    questions: Vec<Question>,
    answers: HashMap<String, OptionLabel>,
    remaining_seconds: u32,
    epoch: u64,
    started_at: Option<DateTime<Utc>>,
    submitted_at: Option<DateTime<Utc>>,
    last_activity: Instant,
}

impl Default for AssessmentSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Configuring,
            configuration: None,
            questions: Vec::new(),
            answers: HashMap::new(),
            remaining_seconds: 0,
            epoch: 0,
            started_at: None,
            submitted_at: None,
            last_activity: Instant::now(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn configuration(&self) -> Option<&TestConfiguration> {
        self.configuration.as_ref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &HashMap<String, OptionLabel> {
        &self.answers
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    /// Last time a client or the clock moved this session.
    pub fn last_activity(&self) -> Instant {
        self.last_activity
    }

    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    pub fn ensure_configuring(&self) -> AppResult<()> {
        if self.state != SessionState::Configuring {
            return Err(AppError::InvalidTransition(format!(
                "Cannot start a test while the session is {}; reset it first",
                self.state
            )));
        }
        Ok(())
    }

    /// Configuring -> InProgress with an already assembled question set.
    /// Returns the epoch the countdown for this attempt must carry.
    pub fn begin(
        &mut self,
        configuration: TestConfiguration,
        questions: Vec<Question>,
    ) -> AppResult<u64> {
        self.ensure_configuring()?;

        self.remaining_seconds = configuration.duration_seconds();
        self.configuration = Some(configuration);
        self.questions = questions;
        self.answers.clear();
        self.started_at = Some(Utc::now());
        self.submitted_at = None;
        self.state = SessionState::InProgress;
        self.touch();

        Ok(self.epoch)
    }

    /// Records or overwrites the answer for one question. Last write wins.
    pub fn select_answer(&mut self, question_id: &str, option: &str) -> AppResult<()> {
        if self.state != SessionState::InProgress {
            return Err(AppError::InvalidTransition(format!(
                "Answers can only be recorded while the test is in progress (session is {})",
                self.state
            )));
        }

        let label: OptionLabel = option.parse()?;

        if !self.questions.iter().any(|q| q.id == question_id) {
            return Err(AppError::InvalidAnswer(format!(
                "Question '{}' is not part of this test",
                question_id
            )));
        }

        self.answers.insert(question_id.to_string(), label);
        self.touch();
        Ok(())
    }

    /// InProgress -> Submitted. Returns `Ok(false)` when already submitted.
    pub fn submit(&mut self) -> AppResult<bool> {
        match self.state {
            SessionState::InProgress => {
                self.state = SessionState::Submitted;
                self.submitted_at = Some(Utc::now());
                self.touch();
                Ok(true)
            }
            SessionState::Submitted => Ok(false),
            SessionState::Configuring => Err(AppError::InvalidTransition(
                "Cannot submit a test that has not started".to_string(),
            )),
        }
    }

    /// Takes one second off the clock, submitting when it reaches zero.
    pub fn tick(&mut self, epoch: u64) -> TickOutcome {
        if epoch != self.epoch || self.state != SessionState::InProgress {
            return TickOutcome::Ignored;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return TickOutcome::Running(self.remaining_seconds);
        }

        match self.submit() {
            Ok(true) => TickOutcome::Expired,
            _ => TickOutcome::Ignored,
        }
    }

    /// Back to an empty Configuring session. Bumps the epoch so any
    /// countdown started before the reset can no longer touch it.
    pub fn reset(&mut self) {
        let epoch = self.epoch.wrapping_add(1);
        *self = Self::new();
        self.epoch = epoch;
    }

    pub fn is_terminal(&self) -> bool {
        self.state == SessionState::Submitted
    }
}
