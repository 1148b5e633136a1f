#![allow(dead_code)]

use std::{collections::HashMap, path::Path, sync::Arc};

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::RwLock;

use quiz_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::{
        domain::{QuestionKind, QuizDefinition, QuizSummary, Submission},
        dto::request::{QuestionDraft, QuizDraft},
    },
    repositories::{QuizRepository, SubmissionRepository},
    storage::LocalMediaStore,
};

pub struct InMemoryQuizRepository {
    quizzes: Arc<RwLock<Vec<QuizDefinition>>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self {
            quizzes: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create(&self, quiz: QuizDefinition) -> AppResult<QuizDefinition> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.iter().any(|q| q.id == quiz.id) {
            return Err(AppError::AlreadyExists(format!(
                "Quiz with id '{}' already exists",
                quiz.id
            )));
        }
        quizzes.push(quiz.clone());
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizDefinition>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.iter().find(|q| q.id == id).cloned())
    }

    async fn list_summaries(&self, offset: i64, limit: i64) -> AppResult<(Vec<QuizSummary>, i64)> {
        let quizzes = self.quizzes.read().await;
        let total = quizzes.len() as i64;

        // newest first, like the Mongo implementation
        let page = quizzes
            .iter()
            .rev()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(QuizSummary::from)
            .collect();

        Ok((page, total))
    }
}

pub struct InMemorySubmissionRepository {
    submissions: Arc<RwLock<HashMap<String, Submission>>>,
    one_per_quiz: bool,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self {
            submissions: Arc::new(RwLock::new(HashMap::new())),
            one_per_quiz: false,
        }
    }

    /// Behaves like the unique `examinee_quiz` index.
    pub fn one_per_quiz() -> Self {
        Self {
            one_per_quiz: true,
            ..Self::new()
        }
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn create(&self, submission: Submission) -> AppResult<Submission> {
        let mut submissions = self.submissions.write().await;
        if submissions.contains_key(&submission.id) {
            return Err(AppError::AlreadyExists(format!(
                "Submission with id '{}' already exists",
                submission.id
            )));
        }
        if self.one_per_quiz
            && submissions.values().any(|s| {
                s.examinee_id == submission.examinee_id && s.quiz_id == submission.quiz_id
            })
        {
            return Err(AppError::AlreadyExists(format!(
                "Quiz '{}' has already been submitted",
                submission.quiz_id
            )));
        }
        submissions.insert(submission.id.clone(), submission.clone());
        Ok(submission)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>> {
        let submissions = self.submissions.read().await;
        Ok(submissions.get(id).cloned())
    }

    async fn find_by_examinee(
        &self,
        examinee_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Submission>, i64)> {
        let submissions = self.submissions.read().await;
        let mut items: Vec<_> = submissions
            .values()
            .filter(|s| s.examinee_id == examinee_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

        let total = items.len() as i64;
        let page = items
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();

        Ok((page, total))
    }

    async fn has_submitted(&self, examinee_id: &str, quiz_id: &str) -> AppResult<bool> {
        let submissions = self.submissions.read().await;
        Ok(submissions
            .values()
            .any(|s| s.examinee_id == examinee_id && s.quiz_id == quiz_id))
    }
}

pub fn test_config(upload_dir: &Path) -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "quiz-test".to_string(),
        quizzes_collection: "quizzes".to_string(),
        submissions_collection: "submissions".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8080,
        jwt_secret: SecretString::from("integration_test_secret".to_string()),
        jwt_expiration_hours: 1,
        upload_dir: upload_dir.to_path_buf(),
        media_base_url: "http://media.test".to_string(),
        max_upload_bytes: 64 * 1024,
        allow_resubmission: true,
    }
}

pub fn in_memory_state(config: Config) -> AppState {
    let media_store = LocalMediaStore::new(&config.upload_dir, &config.media_base_url);
    let submissions = if config.allow_resubmission {
        InMemorySubmissionRepository::new()
    } else {
        InMemorySubmissionRepository::one_per_quiz()
    };
    AppState::from_parts(
        config,
        Arc::new(InMemoryQuizRepository::new()),
        Arc::new(submissions),
        Arc::new(media_store),
    )
}

pub fn question(kind: QuestionKind, correct_option_index: i64) -> QuestionDraft {
    QuestionDraft {
        kind,
        prompt: format!("Pick option {}", correct_option_index),
        options: vec![
            "zero".to_string(),
            "one".to_string(),
            "two".to_string(),
            "three".to_string(),
        ],
        correct_option_index,
        media_ref: match kind {
            QuestionKind::Text => None,
            QuestionKind::Image => Some("/uploads/picture-1.png".to_string()),
            QuestionKind::Audio => Some("/uploads/sound-1.mp3".to_string()),
        },
    }
}

/// Ten questions, image at 0 and audio at 1; question `i` expects `i % 4`.
pub fn draft(title: &str) -> QuizDraft {
    let questions = (0..10)
        .map(|i| {
            let kind = match i {
                0 => QuestionKind::Image,
                1 => QuestionKind::Audio,
                _ => QuestionKind::Text,
            };
            question(kind, i % 4)
        })
        .collect();

    QuizDraft {
        title: title.to_string(),
        questions,
    }
}
