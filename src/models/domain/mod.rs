pub mod assessment_session;
pub mod question;
pub mod result_summary;
pub mod subject;
pub mod test_configuration;
pub use assessment_session::{AssessmentSession, SessionState, TickOutcome};
pub use question::{Difficulty, OptionLabel, Question, QuestionOptions};
pub use result_summary::{AnswerOutcome, QuestionReview, ResultSummary};
pub use subject::Subject;
pub use test_configuration::{CandidateDetails, TestConfiguration, TestMode};
