pub mod fixtures {
    use crate::models::domain::{Difficulty, OptionLabel, Question, QuestionOptions, Subject};

    /// A question with a predictable id and answer.
    pub fn question(id: &str, subject: Subject, answer: OptionLabel) -> Question {
        Question {
            id: id.to_string(),
            subject,
            topic: Some("general".to_string()),
            prompt: format!("Prompt for {}", id),
            options: QuestionOptions {
                a: "first".to_string(),
                b: "second".to_string(),
                c: "third".to_string(),
                d: "fourth".to_string(),
            },
            answer,
            explanation: Some(format!("Because {} is {}", id, answer)),
            difficulty: Difficulty::Medium,
        }
    }

    /// `count` questions with ids `<subject>-<n>`, answers cycling A..D.
    pub fn questions_for(subject: Subject, count: usize) -> Vec<Question> {
        (0..count)
            .map(|i| {
                question(
                    &format!("{}-{}", subject, i),
                    subject,
                    OptionLabel::ALL[i % OptionLabel::ALL.len()],
                )
            })
            .collect()
    }
}

pub mod in_memory {
    use std::{
        collections::{HashMap, HashSet},
        sync::Mutex,
    };

    use async_trait::async_trait;
    use rand::seq::SliceRandom;

    use super::fixtures;
    use crate::{
        errors::{AppError, AppResult},
        models::domain::{Question, Subject},
        repositories::{PageRequest, QuestionFilter, QuestionRepository},
    };

    /// Question source backed by plain vectors, with switchable outages.
    #[derive(Default)]
    pub struct InMemoryQuestionRepository {
        pools: HashMap<Subject, Vec<Question>>,
        unavailable: HashSet<Subject>,
        sample_calls: Mutex<Vec<(Subject, u32)>>,
    }

    impl InMemoryQuestionRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_pool(mut self, subject: Subject, count: usize) -> Self {
            self.pools
                .insert(subject, fixtures::questions_for(subject, count));
            self
        }

        pub fn with_questions(mut self, subject: Subject, questions: Vec<Question>) -> Self {
            self.pools.insert(subject, questions);
            self
        }

        pub fn with_outage(mut self, subject: Subject) -> Self {
            self.unavailable.insert(subject);
            self
        }

        pub fn sample_calls(&self) -> Vec<(Subject, u32)> {
            self.sample_calls
                .lock()
                .map(|calls| calls.clone())
                .unwrap_or_default()
        }

        fn pool(&self, subject: Subject) -> AppResult<Vec<Question>> {
            if self.unavailable.contains(&subject) {
                return Err(AppError::SourceUnavailable(format!(
                    "{} collection unreachable",
                    subject
                )));
            }
            Ok(self.pools.get(&subject).cloned().unwrap_or_default())
        }
    }

    #[async_trait]
    impl QuestionRepository for InMemoryQuestionRepository {
        async fn fetch_all(&self, subject: Subject) -> AppResult<Vec<Question>> {
            self.pool(subject)
        }

        async fn fetch_random_sample(
            &self,
            subject: Subject,
            size: u32,
        ) -> AppResult<Vec<Question>> {
            if let Ok(mut calls) = self.sample_calls.lock() {
                calls.push((subject, size));
            }

            let mut pool = self.pool(subject)?;
            pool.shuffle(&mut rand::thread_rng());
            pool.truncate(size as usize);
            Ok(pool)
        }

        async fn fetch_page(
            &self,
            subject: Subject,
            filter: QuestionFilter,
            page: Option<PageRequest>,
        ) -> AppResult<(Vec<Question>, u64)> {
            let matching: Vec<Question> = self
                .pool(subject)?
                .into_iter()
                .filter(|q| filter.matches(q))
                .collect();
            let total = matching.len() as u64;

            let items = match page {
                Some(page) => matching
                    .into_iter()
                    .skip(page.skip() as usize)
                    .take(page.limit as usize)
                    .collect(),
                None => matching,
            };

            Ok((items, total))
        }
    }
}

mod tests {
    use super::fixtures::*;
    use crate::models::domain::{OptionLabel, Subject};

    #[test]
    fn test_fixtures_questions_for() {
        let questions = questions_for(Subject::Verbal, 5);

        assert_eq!(questions.len(), 5);
        assert_eq!(questions[0].id, "verbal-0");
        assert_eq!(questions[0].answer, OptionLabel::A);
        assert_eq!(questions[4].answer, OptionLabel::A);
        assert_eq!(questions[2].answer, OptionLabel::C);
        assert!(questions.iter().all(|q| q.subject == Subject::Verbal));
    }
}
