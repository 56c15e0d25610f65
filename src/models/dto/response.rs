use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::domain::{
    AssessmentSession, Difficulty, OptionLabel, Question, QuestionOptions, ResultSummary,
    SessionState, Subject, TestConfiguration,
};

/// A question as shown to a client. The correct option and explanation are
/// only filled in once revealing them is allowed.
#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
pub struct QuestionView {
    pub id: String,
    pub subject: Subject,
    pub topic: Option<String>,
    pub prompt: String,
    pub options: QuestionOptions,
    pub difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<OptionLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl QuestionView {
    pub fn hidden(question: &Question) -> Self {
        Self {
            id: question.id.clone(),
            subject: question.subject,
            topic: question.topic.clone(),
            prompt: question.prompt.clone(),
            options: question.options.clone(),
            difficulty: question.difficulty,
            answer: None,
            explanation: None,
        }
    }

    pub fn revealed(question: &Question) -> Self {
        Self {
            answer: Some(question.answer),
            explanation: question.explanation.clone(),
            ..Self::hidden(question)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
pub struct AnswerEntry {
    pub question_id: String,
    pub option: OptionLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub state: SessionState,
    pub configuration: Option<TestConfiguration>,
    pub questions: Vec<QuestionView>,
    pub answers: Vec<AnswerEntry>,
    pub remaining_seconds: u32,
    pub remaining_display: String,
    pub answered_count: u32,
    pub total_questions: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub result: Option<ResultSummary>,
}

impl SessionSnapshot {
    pub fn new(id: Uuid, session: &AssessmentSession, result: Option<ResultSummary>) -> Self {
        let reveal = session.is_terminal();
        let questions: Vec<QuestionView> = session
            .questions()
            .iter()
            .map(|q| {
                if reveal {
                    QuestionView::revealed(q)
                } else {
                    QuestionView::hidden(q)
                }
            })
            .collect();

        // Presented in question order rather than map order.
        let answers: Vec<AnswerEntry> = session
            .questions()
            .iter()
            .filter_map(|q| {
                session.answers().get(&q.id).map(|option| AnswerEntry {
                    question_id: q.id.clone(),
                    option: *option,
                })
            })
            .collect();

        Self {
            id,
            state: session.state(),
            configuration: session.configuration().cloned(),
            answered_count: answers.len() as u32,
            total_questions: questions.len() as u32,
            questions,
            answers,
            remaining_seconds: session.remaining_seconds(),
            remaining_display: format_remaining(session.remaining_seconds()),
            started_at: session.started_at(),
            submitted_at: session.submitted_at(),
            result,
        }
    }
}

/// `MM:SS`, minutes are not wrapped into hours.
pub fn format_remaining(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
pub struct QuestionPage {
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
pub struct CombinedQuestionsResponse {
    pub success: bool,
    pub count: u32,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
pub struct SubjectDto {
    pub id: Subject,
    pub name: String,
}

impl From<Subject> for SubjectDto {
    fn from(subject: Subject) -> Self {
        SubjectDto {
            id: subject,
            name: subject.display_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
pub struct DeleteSessionResponse {
    pub message: String,
}
