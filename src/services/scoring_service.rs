use std::collections::HashMap;

use crate::models::domain::{AnswerOutcome, OptionLabel, Question, QuestionReview, ResultSummary};

pub struct ScoringService;

impl ScoringService {
    /// Score a finished question set against the recorded answers.
    ///
    /// Pure: the same inputs always produce the same summary. An empty
    /// question set scores 0%.
    pub fn score(questions: &[Question], answers: &HashMap<String, OptionLabel>) -> ResultSummary {
        let mut correct = 0u32;
        let mut incorrect = 0u32;
        let mut unanswered = 0u32;
        let mut review = Vec::with_capacity(questions.len());

        for question in questions {
            let selected = answers.get(&question.id).copied();
            let outcome = match selected {
                None => {
                    unanswered += 1;
                    AnswerOutcome::Unanswered
                }
                Some(label) if question.is_correct(label) => {
                    correct += 1;
                    AnswerOutcome::Correct
                }
                Some(_) => {
                    incorrect += 1;
                    AnswerOutcome::Incorrect
                }
            };

            review.push(QuestionReview {
                question_id: question.id.clone(),
                prompt: question.prompt.clone(),
                selected,
                correct: question.answer,
                outcome,
                explanation: question.explanation.clone(),
            });
        }

        let total = questions.len() as u32;

        ResultSummary {
            total,
            correct,
            incorrect,
            unanswered,
            percentage: Self::percentage(correct, total),
            configuration: None,
            review,
        }
    }

    fn percentage(correct: u32, total: u32) -> f64 {
        if total == 0 {
            return 0.0;
        }
        let raw = f64::from(correct) / f64::from(total) * 100.0;
        (raw * 100.0).round() / 100.0
    }
}
