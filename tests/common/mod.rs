#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use examania_server::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{Difficulty, OptionLabel, Question, QuestionOptions, Subject},
    repositories::{PageRequest, QuestionFilter, QuestionRepository},
};

pub fn question(id: &str, subject: Subject, answer: OptionLabel) -> Question {
    Question {
        id: id.to_string(),
        subject,
        topic: Some(if id.ends_with('0') { "series" } else { "ratios" }.to_string()),
        prompt: format!("What is {}?", id),
        options: QuestionOptions {
            a: "alpha".to_string(),
            b: "beta".to_string(),
            c: "gamma".to_string(),
            d: "delta".to_string(),
        },
        answer,
        explanation: None,
        difficulty: Difficulty::Medium,
    }
}

pub fn pool(subject: Subject, count: usize) -> Vec<Question> {
    (0..count)
        .map(|i| question(&format!("{}-{}", subject, i), subject, OptionLabel::ALL[i % 4]))
        .collect()
}

pub fn config() -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "examania-it".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 5000,
        countdown_tick_millis: 1000,
        max_active_sessions: 16,
        session_idle_ttl_secs: 1800,
    }
}

/// Deterministic question source: samples are the first `size` questions.
#[derive(Default)]
pub struct FixedQuestionRepository {
    pools: HashMap<Subject, Vec<Question>>,
    down: Vec<Subject>,
    requests: Mutex<Vec<(Subject, u32)>>,
}

impl FixedQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, subject: Subject, count: usize) -> Self {
        self.pools.insert(subject, pool(subject, count));
        self
    }

    pub fn with_questions(mut self, subject: Subject, questions: Vec<Question>) -> Self {
        self.pools.insert(subject, questions);
        self
    }

    pub fn down(mut self, subject: Subject) -> Self {
        self.down.push(subject);
        self
    }

    pub fn requests(&self) -> Vec<(Subject, u32)> {
        let mut requests = self.requests.lock().unwrap().clone();
        requests.sort();
        requests
    }

    fn load(&self, subject: Subject) -> AppResult<Vec<Question>> {
        if self.down.contains(&subject) {
            return Err(AppError::SourceUnavailable(format!("{} is down", subject)));
        }
        Ok(self.pools.get(&subject).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl QuestionRepository for FixedQuestionRepository {
    async fn fetch_all(&self, subject: Subject) -> AppResult<Vec<Question>> {
        self.load(subject)
    }

    async fn fetch_random_sample(&self, subject: Subject, size: u32) -> AppResult<Vec<Question>> {
        self.requests.lock().unwrap().push((subject, size));
        Ok(self.load(subject)?.into_iter().take(size as usize).collect())
    }

    async fn fetch_page(
        &self,
        subject: Subject,
        filter: QuestionFilter,
        page: Option<PageRequest>,
    ) -> AppResult<(Vec<Question>, u64)> {
        let matching: Vec<Question> = self
            .load(subject)?
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
