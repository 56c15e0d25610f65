use async_graphql::{Enum, SimpleObject};
use serde::{Deserialize, Serialize};

use crate::models::domain::question::OptionLabel;
use crate::models::domain::test_configuration::TestConfiguration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "lowercase")]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
    Unanswered,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, SimpleObject)]
pub struct QuestionReview {
    pub question_id: String,
    pub prompt: String,
    pub selected: Option<OptionLabel>,
    pub correct: OptionLabel,
    pub outcome: AnswerOutcome,
    pub explanation: Option<String>,
}

/// Derived from a submitted session; never stored.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, SimpleObject)]
pub struct ResultSummary {
    pub total: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub unanswered: u32,
    pub percentage: f64,
    pub configuration: Option<TestConfiguration>,
    pub review: Vec<QuestionReview>,
}

impl ResultSummary {
    pub fn with_configuration(mut self, configuration: TestConfiguration) -> Self {
        self.configuration = Some(configuration);
        self
    }
}
