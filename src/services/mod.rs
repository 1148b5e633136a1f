pub mod assessment_engine;
pub mod quiz_service;
pub mod quiz_validator;
pub mod submission_service;

pub use assessment_engine::{AssessmentEngine, OutOfRangeError};
pub use quiz_service::QuizService;
pub use quiz_validator::{QuizValidationError, QuizValidator, ValidationReason};
pub use submission_service::SubmissionService;
