use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::AppResult,
    models::{
        domain::Subject,
        dto::{
            request::{CombinedQuestionsRequest, QuestionQueryParams},
            response::{CombinedQuestionsResponse, QuestionPage, QuestionView, SubjectDto},
        },
    },
    repositories::QuestionRepository,
    services::sampler_service::SamplerService,
};

/// Read-only access to the question bank outside of a timed session.
pub struct QuestionService {
    repository: Arc<dyn QuestionRepository>,
    sampler: Arc<SamplerService>,
}

impl QuestionService {
    pub fn new(repository: Arc<dyn QuestionRepository>, sampler: Arc<SamplerService>) -> Self {
        Self {
            repository,
            sampler,
        }
    }

    pub fn subjects(&self) -> Vec<SubjectDto> {
        Subject::ALL.iter().copied().map(SubjectDto::from).collect()
    }

    pub async fn list_questions(
        &self,
        subject: &str,
        params: &QuestionQueryParams,
    ) -> AppResult<QuestionPage> {
        let subject: Subject = subject.parse()?;
        let filter = params.filter()?;
        let page = params.page_request();

        let (questions, total) = if page.is_none() && filter.is_empty() {
            let questions = self.repository.fetch_all(subject).await?;
            let total = questions.len() as u64;
            (questions, total)
        } else {
            self.repository.fetch_page(subject, filter, page).await?
        };
        let questions = questions.iter().map(QuestionView::revealed).collect();

        Ok(match page {
            Some(page) => QuestionPage {
                total,
                page: Some(page.page),
                total_pages: Some(total.div_ceil(page.limit)),
                limit: Some(page.limit),
                questions,
            },
            None => QuestionPage {
                total,
                page: None,
                total_pages: None,
                limit: None,
                questions,
            },
        })
    }

    pub async fn combined_questions(
        &self,
        request: CombinedQuestionsRequest,
    ) -> AppResult<CombinedQuestionsResponse> {
        request.validate()?;
        let configuration = request.into_configuration()?;

        let questions = self.sampler.assemble(&configuration).await?;

        Ok(CombinedQuestionsResponse {
            success: true,
            count: questions.len() as u32,
            questions: questions.iter().map(QuestionView::revealed).collect(),
        })
    }
}
