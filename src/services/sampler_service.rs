use std::{collections::HashSet, sync::Arc};

use futures::future::try_join_all;
use rand::{seq::SliceRandom, Rng};

use crate::{
    errors::AppResult,
    models::domain::{Question, TestConfiguration},
    repositories::QuestionRepository,
};

/// Per-subject request size: every subject gets the same rounded-up share.
pub fn quota_for(target: u32, subjects: usize) -> u32 {
    if subjects == 0 {
        return 0;
    }
    target.div_ceil(subjects as u32)
}

/// Drops repeated question ids (first occurrence wins), shuffles uniformly
/// and keeps at most `target` questions.
pub fn dedupe_shuffle_truncate<R: Rng + ?Sized>(
    working: Vec<Question>,
    target: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut seen = HashSet::with_capacity(working.len());
    let mut unique: Vec<Question> = working
        .into_iter()
        .filter(|q| seen.insert(q.id.clone()))
        .collect();

    unique.shuffle(rng);
    unique.truncate(target);
    unique
}

pub struct SamplerService {
    repository: Arc<dyn QuestionRepository>,
}

impl SamplerService {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    /// Build the question set for a test.
    ///
    /// All subjects are queried concurrently; the first failure aborts the
    /// whole assembly and no partial set is returned. If the pools hold fewer
    /// questions than requested the shorter set is returned as is.
    pub async fn assemble(&self, config: &TestConfiguration) -> AppResult<Vec<Question>> {
        config.validate()?;

        let quota = quota_for(config.question_count, config.subjects.len());
        log::debug!(
            "Sampling {} questions from {:?} ({} per subject)",
            config.question_count,
            config.subjects,
            quota
        );

        let batches = try_join_all(config.subjects.iter().map(|&subject| async move {
            self.repository
                .fetch_random_sample(subject, quota)
                .await
                .inspect_err(|e| log::warn!("Sampling {} failed: {}", subject, e))
        }))
        .await?;

        let working: Vec<Question> = batches.into_iter().flatten().collect();
        let selected = dedupe_shuffle_truncate(
            working,
            config.question_count as usize,
            &mut rand::thread_rng(),
        );

        if selected.len() < config.question_count as usize {
            log::warn!(
                "Under-supply: requested {} questions from {:?}, only {} available",
                config.question_count,
                config.subjects,
                selected.len()
            );
        }

        Ok(selected)
    }
}
