use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One examinee answer as it arrives from the client. Both fields are signed
/// so a malformed index survives parsing and can be reported as such.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(deny_unknown_fields)]
pub struct SubmittedAnswer {
    pub question_index: i64,
    pub selected_option: i64,
}

pub type AnswerSet = Vec<SubmittedAnswer>;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GradedAnswer {
    pub question_index: usize,
    pub selected_option: i64,
    pub is_correct: bool,
}

/// Graded result of one submit call. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Submission {
    pub id: String,
    pub quiz_id: String,
    /// Title at the time of submission, kept for history listings.
    #[serde(default)]
    pub quiz_title: String,
    pub examinee_id: String,
    pub graded_answers: Vec<GradedAnswer>,
    pub score: u32,
    pub question_count: usize,
    #[serde(with = "crate::models::domain::timestamp")]
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn answered_count(&self) -> usize {
        self.graded_answers.len()
    }
}
