use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{QuestionKind, SubmittedAnswer};

/// Quiz as submitted by an author, before any structural checks. Indices are
/// signed so that out-of-range input reaches the validator instead of failing
/// deserialization with a less useful message.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QuizDraft {
    pub title: String,
    pub questions: Vec<QuestionDraft>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QuestionDraft {
    pub kind: QuestionKind,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option_index: i64,
    #[serde(default)]
    pub media_ref: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SubmitAnswersRequest {
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UploadParams {
    pub kind: String,

    #[validate(length(min = 1, max = 255))]
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}
