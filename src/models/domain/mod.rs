pub mod question;
pub mod quiz;
pub mod submission;
pub mod timestamp;
pub mod user;
pub use question::{PublicQuestion, Question, QuestionKind};
pub use quiz::{QuizDefinition, QuizPublicView, QuizSummary};
pub use submission::{AnswerSet, GradedAnswer, Submission, SubmittedAnswer};
pub use user::{Principal, Role};
