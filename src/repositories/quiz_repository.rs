use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{QuizDefinition, QuizSummary},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, quiz: QuizDefinition) -> AppResult<QuizDefinition>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizDefinition>>;
    async fn list_summaries(&self, offset: i64, limit: i64) -> AppResult<(Vec<QuizSummary>, i64)>;
}

pub struct MongoQuizRepository {
    collection: Collection<QuizDefinition>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.quizzes(),
        }
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create(&self, quiz: QuizDefinition) -> AppResult<QuizDefinition> {
        self.collection.insert_one(&quiz).await.map_err(|e| {
            if duplicate_key_message(&e).is_some() {
                AppError::AlreadyExists(format!("Quiz with id '{}' already exists", quiz.id))
            } else {
                e.into()
            }
        })?;
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizDefinition>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn list_summaries(&self, offset: i64, limit: i64) -> AppResult<(Vec<QuizSummary>, i64)> {
        let total = self.collection.count_documents(doc! {}).await? as i64;

        // question_count needs the full question list
        let quizzes: Vec<QuizDefinition> = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .skip(offset.max(0) as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((quizzes.iter().map(QuizSummary::from).collect(), total))
    }
}

/// Server message of a duplicate-key (11000) write error. It names the
/// violated index.
pub(crate) fn duplicate_key_message(err: &mongodb::error::Error) -> Option<&str> {
    use mongodb::error::{ErrorKind, WriteFailure};

    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000 => {
            Some(write_error.message.as_str())
        }
        _ => None,
    }
}
