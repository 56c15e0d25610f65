use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoQuestionRepository, QuestionRepository},
    services::{
        question_service::QuestionService, sampler_service::SamplerService,
        session_service::SessionService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub question_service: Arc<QuestionService>,
    pub session_service: Arc<SessionService>,
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let question_repository = Arc::new(MongoQuestionRepository::new(&db));
        question_repository.ensure_indexes().await?;

        let mut state = Self::with_repository(question_repository, config);
        state.db = Some(db);
        Ok(state)
    }

    /// Wires the services around any question source. No database is attached.
    pub fn with_repository(repository: Arc<dyn QuestionRepository>, config: Config) -> Self {
        let sampler = Arc::new(SamplerService::new(Arc::clone(&repository)));
        let question_service = Arc::new(QuestionService::new(repository, Arc::clone(&sampler)));
        let session_service = Arc::new(SessionService::new(
            sampler,
            config.countdown_tick(),
            config.max_active_sessions,
            config.session_idle_ttl(),
        ));

        Self {
            question_service,
            session_service,
            db: None,
            config: Arc::new(config),
        }
    }
}
