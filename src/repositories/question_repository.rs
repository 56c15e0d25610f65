use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, from_document, oid::ObjectId, Document},
    options::IndexOptions,
    Collection, IndexModel,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{Difficulty, Question, QuestionOptions, Subject},
};

/// Equality filters passed straight through to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub topic: Option<String>,
    pub difficulty: Option<Difficulty>,
}

impl QuestionFilter {
    pub fn is_empty(&self) -> bool {
        self.topic.is_none() && self.difficulty.is_none()
    }

    pub fn to_document(&self) -> Document {
        let mut filter = doc! {};
        if let Some(topic) = &self.topic {
            filter.insert("topic", topic.as_str());
        }
        if let Some(difficulty) = self.difficulty {
            filter.insert("difficulty", difficulty.as_str());
        }
        filter
    }

    pub fn matches(&self, question: &Question) -> bool {
        let topic_ok = match &self.topic {
            Some(topic) => question.topic.as_deref() == Some(topic.as_str()),
            None => true,
        };
        let difficulty_ok = match self.difficulty {
            Some(difficulty) => question.difficulty == difficulty,
            None => true,
        };
        topic_ok && difficulty_ok
    }
}

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn fetch_all(&self, subject: Subject) -> AppResult<Vec<Question>>;
    /// Up to `size` questions picked at random by the store.
    async fn fetch_random_sample(&self, subject: Subject, size: u32) -> AppResult<Vec<Question>>;
    async fn fetch_page(
        &self,
        subject: Subject,
        filter: QuestionFilter,
        page: Option<PageRequest>,
    ) -> AppResult<(Vec<Question>, u64)>;
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
struct StoredOptions {
    #[serde(rename = "A", default)]
    a: String,
    #[serde(rename = "B", default)]
    b: String,
    #[serde(rename = "C", default)]
    c: String,
    #[serde(rename = "D", default)]
    d: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
struct QuestionDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default)]
    topic: Option<String>,
    question: String,
    #[serde(default)]
    options: StoredOptions,
    answer: String,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    difficulty: Difficulty,
}

impl QuestionDocument {
    fn into_question(self, subject: Subject) -> Option<Question> {
        let answer = match self.answer.trim().to_ascii_uppercase().parse() {
            Ok(answer) => answer,
            Err(_) => {
                log::warn!(
                    "Skipping {} question {} with unusable answer '{}'",
                    subject,
                    self.id.to_hex(),
                    self.answer
                );
                return None;
            }
        };

        Some(Question {
            id: self.id.to_hex(),
            subject,
            topic: self.topic,
            prompt: self.question,
            options: QuestionOptions {
                a: self.options.a,
                b: self.options.b,
                c: self.options.c,
                d: self.options.d,
            },
            answer,
            explanation: self.explanation,
            difficulty: self.difficulty,
        })
    }
}

/// Decodes raw documents one by one. A document that does not decode, or
/// whose answer is not one of A-D, is logged and skipped so that one bad
/// record never fails a whole batch.
fn decode_questions(subject: Subject, documents: Vec<Document>) -> Vec<Question> {
    documents
        .into_iter()
        .filter_map(|raw| match from_document::<QuestionDocument>(raw) {
            Ok(document) => document.into_question(subject),
            Err(e) => {
                log::warn!("Skipping undecodable {} question: {}", subject, e);
                None
            }
        })
        .collect()
}

pub struct MongoQuestionRepository {
    db: Database,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    fn collection(&self, subject: Subject) -> Collection<Document> {
        self.db.get_collection(&subject.collection_name())
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        for subject in Subject::ALL {
            log::info!("Creating indexes for {} collection", subject.collection_name());

            let topic_index = IndexModel::builder()
                .keys(doc! { "topic": 1 })
                .options(IndexOptions::builder().name("topic".to_string()).build())
                .build();

            let difficulty_index = IndexModel::builder()
                .keys(doc! { "difficulty": 1 })
                .options(
                    IndexOptions::builder()
                        .name("difficulty".to_string())
                        .build(),
                )
                .build();

            let collection = self.collection(subject);
            collection.create_index(topic_index).await?;
            collection.create_index(difficulty_index).await?;
        }

        log::info!("Successfully created indexes for question collections");
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn fetch_all(&self, subject: Subject) -> AppResult<Vec<Question>> {
        let documents: Vec<Document> =
            self.collection(subject).find(doc! {}).await?.try_collect().await?;
        Ok(decode_questions(subject, documents))
    }

    async fn fetch_random_sample(&self, subject: Subject, size: u32) -> AppResult<Vec<Question>> {
        if size == 0 {
            return Ok(Vec::new());
        }

        let pipeline = vec![doc! { "$sample": { "size": size as i64 } }];
        let documents: Vec<Document> = self
            .collection(subject)
            .aggregate(pipeline)
            .await?
            .try_collect()
            .await?;

        Ok(decode_questions(subject, documents))
    }

    async fn fetch_page(
        &self,
        subject: Subject,
        filter: QuestionFilter,
        page: Option<PageRequest>,
    ) -> AppResult<(Vec<Question>, u64)> {
        let collection = self.collection(subject);
        let filter = filter.to_document();

        let documents: Vec<Document> = match page {
            Some(page) => {
                collection
                    .find(filter.clone())
                    .skip(page.skip())
                    .limit(page.limit as i64)
                    .await?
                    .try_collect()
                    .await?
            }
            None => collection.find(filter.clone()).await?.try_collect().await?,
        };

        let total = match page {
            Some(_) => collection.count_documents(filter).await?,
            None => documents.len() as u64,
        };

        Ok((decode_questions(subject, documents), total))
    }
}
