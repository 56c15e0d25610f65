use async_graphql::InputObject;
use serde::Deserialize;
use validator::Validate;

use crate::errors::AppResult;
use crate::models::domain::subject::parse_subjects;
use crate::models::domain::{CandidateDetails, Difficulty, TestConfiguration, TestMode};
use crate::repositories::{PageRequest, QuestionFilter};

pub const DEFAULT_PAGE_LIMIT: u64 = 10;
pub const MAX_PAGE_LIMIT: u64 = 100;

#[derive(Debug, Clone, Deserialize, InputObject)]
pub struct StartTestRequest {
    pub mode: TestMode,
    pub subjects: Vec<String>,
    pub question_count: u32,
    pub candidate: CandidateDetails,
}

impl StartTestRequest {
    /// Resolves subject identifiers; unknown ones fail before any fetch.
    pub fn into_configuration(self) -> AppResult<TestConfiguration> {
        let subjects = parse_subjects(&self.subjects)?;
        Ok(TestConfiguration::new(self.mode, subjects, self.question_count)
            .with_candidate(self.candidate))
    }
}

#[derive(Debug, Clone, Deserialize, InputObject)]
pub struct SelectAnswerRequest {
    pub question_id: String,
    pub option: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct CombinedQuestionsRequest {
    #[validate(length(min = 2, message = "At least two subjects required"))]
    pub subjects: Vec<String>,

    #[validate(range(min = 1, message = "Invalid question count"))]
    pub count: u32,
}

impl CombinedQuestionsRequest {
    pub fn into_configuration(self) -> AppResult<TestConfiguration> {
        let subjects = parse_subjects(&self.subjects)?;
        Ok(TestConfiguration::new(TestMode::Combined, subjects, self.count))
    }
}

/// Query string of the question bank listing. `page` and `limit` only take
/// effect together; everything else is an equality filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionQueryParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub topic: Option<String>,
    pub difficulty: Option<String>,
}

impl QuestionQueryParams {
    pub fn page_request(&self) -> Option<PageRequest> {
        match (self.page, self.limit) {
            (Some(page), Some(limit)) => Some(PageRequest {
                page: page.max(1),
                limit: if limit == 0 {
                    DEFAULT_PAGE_LIMIT
                } else {
                    limit.min(MAX_PAGE_LIMIT)
                },
            }),
            _ => None,
        }
    }

    pub fn filter(&self) -> AppResult<QuestionFilter> {
        let difficulty = self
            .difficulty
            .as_deref()
            .map(str::parse::<Difficulty>)
            .transpose()?;

        Ok(QuestionFilter {
            topic: self.topic.clone().filter(|t| !t.trim().is_empty()),
            difficulty,
        })
    }
}
