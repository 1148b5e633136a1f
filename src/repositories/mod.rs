pub mod quiz_repository;
pub mod submission_repository;

pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use submission_repository::{MongoSubmissionRepository, SubmissionRepository};
