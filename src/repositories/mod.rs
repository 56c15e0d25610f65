pub mod question_repository;

pub use question_repository::{
    MongoQuestionRepository, PageRequest, QuestionFilter, QuestionRepository,
};

#[cfg(test)]
pub use question_repository::MockQuestionRepository;
