use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::question::{PublicQuestion, Question};

/// Authoritative quiz record, answer key included. Only the validator builds
/// one from author input; `id` and `owner_id` never change afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizDefinition {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
    pub owner_id: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::models::domain::timestamp::option"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl QuizDefinition {
    pub fn new(title: &str, questions: Vec<Question>, owner_id: &str) -> Self {
        QuizDefinition {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            questions,
            owner_id: owner_id.to_string(),
            created_at: Some(Utc::now()),
        }
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// Examinee-safe projection of a [`QuizDefinition`]. Derived on every read,
/// never stored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizPublicView {
    pub id: String,
    pub title: String,
    pub questions: Vec<PublicQuestion>,
    pub owner_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl QuizPublicView {
    /// Rewrites every media reference, e.g. into a fetchable URL.
    pub fn map_media_refs<F>(mut self, resolve: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        for question in &mut self.questions {
            if let Some(media_ref) = question.media_ref.as_deref() {
                question.media_ref = Some(resolve(media_ref));
            }
        }
        self
    }
}

/// Listing row; carries no question content.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub question_count: usize,
}

impl From<&QuizDefinition> for QuizSummary {
    fn from(quiz: &QuizDefinition) -> Self {
        QuizSummary {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
            question_count: quiz.question_count(),
        }
    }
}
