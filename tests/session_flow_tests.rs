mod common;

use std::{collections::HashSet, sync::Arc, time::Duration};

use common::{config, FixedQuestionRepository};
use examania_server::{
    app_state::AppState,
    errors::AppError,
    models::domain::{CandidateDetails, SessionState, Subject, TestConfiguration, TestMode},
};

fn candidate() -> CandidateDetails {
    CandidateDetails {
        name: "Tara".to_string(),
        email: Some("tara@example.com".to_string()),
        phone: None,
    }
}

fn configuration(mode: TestMode, subjects: &[Subject], count: u32) -> TestConfiguration {
    TestConfiguration::new(mode, subjects.to_vec(), count).with_candidate(candidate())
}

fn app(repository: FixedQuestionRepository) -> (AppState, Arc<FixedQuestionRepository>) {
    let repository = Arc::new(repository);
    let state = AppState::with_repository(repository.clone(), config());
    (state, repository)
}

#[tokio::test(start_paused = true)]
async fn single_subject_full_supply() {
    let (state, repository) = app(FixedQuestionRepository::new().with(Subject::Aptitude, 50));
    let sessions = &state.session_service;

    let id = sessions.create_session().await.unwrap().id;
    let snapshot = sessions
        .start(&id, configuration(TestMode::SingleSubject, &[Subject::Aptitude], 20))
        .await
        .unwrap();

    let ids: HashSet<_> = snapshot.questions.iter().map(|q| q.id.clone()).collect();
    assert_eq!(snapshot.questions.len(), 20);
    assert_eq!(ids.len(), 20);
    assert!(snapshot.questions.iter().all(|q| q.subject == Subject::Aptitude));
    assert_eq!(repository.requests(), vec![(Subject::Aptitude, 20)]);
}

#[tokio::test(start_paused = true)]
async fn combined_even_split() {
    let (state, repository) = app(
        FixedQuestionRepository::new()
            .with(Subject::Aptitude, 15)
            .with(Subject::Verbal, 15),
    );
    let sessions = &state.session_service;

    let id = sessions.create_session().await.unwrap().id;
    let snapshot = sessions
        .start(
            &id,
            configuration(TestMode::Combined, &[Subject::Aptitude, Subject::Verbal], 20),
        )
        .await
        .unwrap();

    assert_eq!(snapshot.total_questions, 20);
    assert_eq!(
        repository.requests(),
        vec![(Subject::Aptitude, 10), (Subject::Verbal, 10)]
    );
}

#[tokio::test(start_paused = true)]
async fn under_supply_starts_a_shorter_test() {
    let (state, _) = app(FixedQuestionRepository::new().with(Subject::Gk, 30));
    let sessions = &state.session_service;

    let id = sessions.create_session().await.unwrap().id;
    let snapshot = sessions
        .start(&id, configuration(TestMode::SingleSubject, &[Subject::Gk], 100))
        .await
        .unwrap();

    assert_eq!(snapshot.total_questions, 30);
    assert_eq!(snapshot.remaining_seconds, 4500);
    assert_eq!(snapshot.remaining_display, "75:00");
}

#[tokio::test(start_paused = true)]
async fn one_subject_down_fails_the_whole_start() {
    let (state, _) = app(
        FixedQuestionRepository::new()
            .with(Subject::Programming, 40)
            .down(Subject::Computer),
    );
    let sessions = &state.session_service;

    let id = sessions.create_session().await.unwrap().id;
    let err = sessions
        .start(
            &id,
            configuration(
                TestMode::Combined,
                &[Subject::Programming, Subject::Computer],
                20,
            ),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::SourceUnavailable(_)));
    let snapshot = sessions.snapshot(&id).await.unwrap();
    assert_eq!(snapshot.state, SessionState::Configuring);
    assert_eq!(snapshot.total_questions, 0);
}

#[tokio::test(start_paused = true)]
async fn countdown_runs_to_automatic_submission() {
    let (state, _) = app(FixedQuestionRepository::new().with(Subject::Logical, 40));
    let sessions = &state.session_service;

    let id = sessions.create_session().await.unwrap().id;
    let started = sessions
        .start(&id, configuration(TestMode::SingleSubject, &[Subject::Logical], 20))
        .await
        .unwrap();
    assert_eq!(started.remaining_seconds, 900);

    tokio::time::sleep(Duration::from_millis(450_500)).await;
    let halfway = sessions.snapshot(&id).await.unwrap();
    assert_eq!(halfway.state, SessionState::InProgress);
    assert_eq!(halfway.remaining_seconds, 450);
    assert_eq!(halfway.remaining_display, "07:30");

    tokio::time::sleep(Duration::from_secs(450)).await;
    let finished = sessions.snapshot(&id).await.unwrap();
    assert_eq!(finished.state, SessionState::Submitted);
    assert_eq!(finished.remaining_seconds, 0);

    let result = sessions.result(&id).await.unwrap();
    assert_eq!(result.total, 20);
    assert_eq!(result.unanswered, 20);
    assert_eq!(result.percentage, 0.0);
}

#[tokio::test(start_paused = true)]
async fn answers_are_scored_on_submit() {
    let (state, _) = app(FixedQuestionRepository::new().with(Subject::Verbal, 20));
    let sessions = &state.session_service;

    let id = sessions.create_session().await.unwrap().id;
    sessions
        .start(&id, configuration(TestMode::SingleSubject, &[Subject::Verbal], 20))
        .await
        .unwrap();

    // verbal-0 is A, verbal-1 is B, verbal-2 is C.
    sessions.select_answer(&id, "verbal-0", "A").await.unwrap();
    sessions.select_answer(&id, "verbal-1", "D").await.unwrap();
    sessions.select_answer(&id, "verbal-1", "B").await.unwrap();
    sessions.select_answer(&id, "verbal-2", "A").await.unwrap();

    let bad = sessions.select_answer(&id, "verbal-3", "E").await.unwrap_err();
    assert!(matches!(bad, AppError::InvalidAnswer(_)));
    let unknown = sessions.select_answer(&id, "gk-1", "A").await.unwrap_err();
    assert!(matches!(unknown, AppError::InvalidAnswer(_)));

    let result = sessions.submit(&id).await.unwrap();
    assert_eq!(result.correct, 2);
    assert_eq!(result.incorrect, 1);
    assert_eq!(result.unanswered, 17);
    assert_eq!(result.percentage, 10.0);

    let again = sessions.submit(&id).await.unwrap();
    assert_eq!(again, result);

    let late = sessions.select_answer(&id, "verbal-3", "A").await.unwrap_err();
    assert!(matches!(late, AppError::InvalidTransition(_)));
}

#[tokio::test(start_paused = true)]
async fn reset_allows_a_fresh_attempt() {
    let (state, _) = app(
        FixedQuestionRepository::new()
            .with(Subject::Aptitude, 30)
            .with(Subject::Gk, 30),
    );
    let sessions = &state.session_service;

    let id = sessions.create_session().await.unwrap().id;
    sessions
        .start(&id, configuration(TestMode::SingleSubject, &[Subject::Aptitude], 20))
        .await
        .unwrap();
    sessions.submit(&id).await.unwrap();

    let reset = sessions.reset(&id).await.unwrap();
    assert_eq!(reset.state, SessionState::Configuring);
    assert!(reset.configuration.is_none());
    assert!(reset.answers.is_empty());

    let restarted = sessions
        .start(&id, configuration(TestMode::SingleSubject, &[Subject::Gk], 30))
        .await
        .unwrap();
    assert_eq!(restarted.remaining_seconds, 1350);
    assert!(restarted.questions.iter().all(|q| q.subject == Subject::Gk));
}
