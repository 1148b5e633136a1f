use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{GradedAnswer, QuizDefinition, QuizSummary, Submission};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub message: String,
}

pub type CreateQuizResponse = ApiResponse<QuizDefinition>;

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

pub type QuizListResponse = PaginatedResponse<QuizSummary>;

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionDto {
    pub id: String,
    pub quiz_id: String,
    pub quiz_title: String,
    pub score: u32,
    pub question_count: usize,
    pub graded_answers: Vec<GradedAnswer>,
    pub submitted_at: DateTime<Utc>,
}

impl From<Submission> for SubmissionDto {
    fn from(submission: Submission) -> Self {
        SubmissionDto {
            id: submission.id,
            quiz_id: submission.quiz_id,
            quiz_title: submission.quiz_title,
            score: submission.score,
            question_count: submission.question_count,
            graded_answers: submission.graded_answers,
            submitted_at: submission.submitted_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub message: String,
    pub score: u32,
    pub question_count: usize,
    pub submission: SubmissionDto,
}

impl From<Submission> for SubmitResponse {
    fn from(submission: Submission) -> Self {
        SubmitResponse {
            message: "Quiz submitted".to_string(),
            score: submission.score,
            question_count: submission.question_count,
            submission: submission.into(),
        }
    }
}

pub type SubmissionListResponse = PaginatedResponse<SubmissionDto>;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub media_ref: String,
    pub url: String,
    pub kind: &'static str,
}
