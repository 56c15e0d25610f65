use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::{
    sync::{Mutex, RwLock},
    time::Instant,
};
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{AssessmentSession, ResultSummary, SessionState, TestConfiguration},
        dto::response::SessionSnapshot,
    },
    services::{
        countdown::CountdownDriver, sampler_service::SamplerService,
        scoring_service::ScoringService,
    },
};

fn summarize(session: &AssessmentSession) -> Option<ResultSummary> {
    if !session.is_terminal() {
        return None;
    }

    let summary = ScoringService::score(session.questions(), session.answers());
    Some(match session.configuration() {
        Some(configuration) => summary.with_configuration(configuration.clone()),
        None => summary,
    })
}

/// Owns one assessment session and the countdown running against it.
///
/// Every transition takes the session lock, so a manual submit and a
/// timer-driven submit can never both run the transition body.
pub struct SessionController {
    id: Uuid,
    session: Arc<Mutex<AssessmentSession>>,
    countdown: Mutex<Option<CountdownDriver>>,
    sampler: Arc<SamplerService>,
    tick: Duration,
}

impl SessionController {
    pub fn new(id: Uuid, sampler: Arc<SamplerService>, tick: Duration) -> Self {
        Self {
            id,
            session: Arc::new(Mutex::new(AssessmentSession::new())),
            countdown: Mutex::new(None),
            sampler,
            tick,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Configuring -> InProgress. On any failure the session stays in
    /// `Configuring` with nothing changed.
    pub async fn start(&self, configuration: TestConfiguration) -> AppResult<SessionSnapshot> {
        let mut session = self.session.lock().await;
        session.ensure_configuring()?;
        configuration.validate_for_session()?;

        let questions = self.sampler.assemble(&configuration).await?;
        if questions.is_empty() {
            return Err(AppError::NotFound(format!(
                "No questions available for {:?}",
                configuration.subjects
            )));
        }

        let question_count = questions.len();
        let epoch = session.begin(configuration, questions)?;
        let driver = CountdownDriver::spawn(Arc::downgrade(&self.session), epoch, self.tick);
        if let Some(previous) = self.countdown.lock().await.replace(driver) {
            previous.cancel();
        }

        log::info!(
            "Session {} started with {} questions, {}s on the clock",
            self.id,
            question_count,
            session.remaining_seconds()
        );

        Ok(SessionSnapshot::new(self.id, &session, None))
    }

    pub async fn select_answer(&self, question_id: &str, option: &str) -> AppResult<SessionSnapshot> {
        let mut session = self.session.lock().await;
        session.select_answer(question_id, option)?;
        Ok(SessionSnapshot::new(self.id, &session, None))
    }

    /// InProgress -> Submitted; a repeated submit returns the same result.
    pub async fn submit(&self) -> AppResult<ResultSummary> {
        let mut session = self.session.lock().await;
        let transitioned = session.submit()?;
        self.stop_countdown().await;

        if transitioned {
            log::info!(
                "Session {} submitted with {}s remaining",
                self.id,
                session.remaining_seconds()
            );
        }

        summarize(&session).ok_or_else(|| {
            AppError::InternalError("Submitted session produced no result".to_string())
        })
    }

    /// Discards the attempt and returns to an empty `Configuring` session.
    pub async fn reset(&self) -> SessionSnapshot {
        let mut session = self.session.lock().await;
        session.reset();
        self.stop_countdown().await;

        log::info!("Session {} reset", self.id);
        SessionSnapshot::new(self.id, &session, None)
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let mut session = self.session.lock().await;
        session.touch();
        SessionSnapshot::new(self.id, &session, summarize(&session))
    }

    pub async fn state(&self) -> SessionState {
        self.session.lock().await.state()
    }

    pub async fn result(&self) -> AppResult<ResultSummary> {
        let mut session = self.session.lock().await;
        session.touch();
        summarize(&session).ok_or_else(|| {
            AppError::InvalidTransition(format!(
                "Results are only available after submission (session is {})",
                session.state()
            ))
        })
    }

    /// State and idle time, or `None` while a test is running or another
    /// request holds the session.
    fn idle_for(&self) -> Option<(SessionState, Duration)> {
        let session = self.session.try_lock().ok()?;
        if session.state() == SessionState::InProgress {
            return None;
        }
        Some((
            session.state(),
            Instant::now().saturating_duration_since(session.last_activity()),
        ))
    }

    pub async fn shutdown(&self) {
        self.stop_countdown().await;
    }

    async fn stop_countdown(&self) {
        if let Some(driver) = self.countdown.lock().await.take() {
            driver.cancel();
        }
    }
}

/// In-memory registry of live sessions.
///
/// Sessions not running a test are reclaimed once idle for `idle_ttl`. When
/// the store is full, the longest-idle submitted session gives up its slot.
/// Running tests are never evicted.
pub struct SessionService {
    sessions: RwLock<HashMap<Uuid, Arc<SessionController>>>,
    sampler: Arc<SamplerService>,
    tick: Duration,
    max_sessions: usize,
    idle_ttl: Duration,
}

impl SessionService {
    pub fn new(
        sampler: Arc<SamplerService>,
        tick: Duration,
        max_sessions: usize,
        idle_ttl: Duration,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            sampler,
            tick,
            max_sessions,
            idle_ttl,
        }
    }

    fn evict_idle(
        &self,
        sessions: &mut HashMap<Uuid, Arc<SessionController>>,
    ) -> Vec<Arc<SessionController>> {
        let mut stale = Vec::new();
        let mut oldest_submitted: Option<(Uuid, Duration)> = None;

        for (id, controller) in sessions.iter() {
            match controller.idle_for() {
                Some((_, idle)) if idle >= self.idle_ttl => stale.push(*id),
                Some((SessionState::Submitted, idle)) => {
                    if oldest_submitted.map_or(true, |(_, longest)| idle > longest) {
                        oldest_submitted = Some((*id, idle));
                    }
                }
                _ => {}
            }
        }

        if stale.is_empty() && sessions.len() >= self.max_sessions {
            stale.extend(oldest_submitted.map(|(id, _)| id));
        }

        stale
            .into_iter()
            .filter_map(|id| sessions.remove(&id))
            .collect()
    }

    pub async fn create_session(&self) -> AppResult<SessionSnapshot> {
        let mut sessions = self.sessions.write().await;

        let evicted = self.evict_idle(&mut sessions);
        for controller in &evicted {
            controller.shutdown().await;
            log::info!("Session {} evicted", controller.id());
        }

        if sessions.len() >= self.max_sessions {
            return Err(AppError::InvalidConfiguration(format!(
                "Too many active sessions (limit {})",
                self.max_sessions
            )));
        }

        let id = Uuid::new_v4();
        let controller = Arc::new(SessionController::new(
            id,
            Arc::clone(&self.sampler),
            self.tick,
        ));
        sessions.insert(id, Arc::clone(&controller));
        log::info!("Session {} created", id);

        Ok(controller.snapshot().await)
    }

    pub async fn get_session(&self, id: &Uuid) -> AppResult<Arc<SessionController>> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session with id '{}' not found", id)))
    }

    pub async fn delete_session(&self, id: &Uuid) -> AppResult<()> {
        let controller = self
            .sessions
            .write()
            .await
            .remove(id)
            .ok_or_else(|| AppError::NotFound(format!("Session with id '{}' not found", id)))?;

        controller.shutdown().await;
        log::info!("Session {} deleted", id);
        Ok(())
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn start(&self, id: &Uuid, configuration: TestConfiguration) -> AppResult<SessionSnapshot> {
        self.get_session(id).await?.start(configuration).await
    }

    pub async fn select_answer(
        &self,
        id: &Uuid,
        question_id: &str,
        option: &str,
    ) -> AppResult<SessionSnapshot> {
        self.get_session(id)
            .await?
            .select_answer(question_id, option)
            .await
    }

    pub async fn submit(&self, id: &Uuid) -> AppResult<ResultSummary> {
        self.get_session(id).await?.submit().await
    }

    pub async fn reset(&self, id: &Uuid) -> AppResult<SessionSnapshot> {
        Ok(self.get_session(id).await?.reset().await)
    }

    pub async fn snapshot(&self, id: &Uuid) -> AppResult<SessionSnapshot> {
        Ok(self.get_session(id).await?.snapshot().await)
    }

    pub async fn result(&self, id: &Uuid) -> AppResult<ResultSummary> {
        self.get_session(id).await?.result().await
    }
}
