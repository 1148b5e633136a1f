use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    db::{Database, EXAMINEE_QUIZ_INDEX},
    errors::{AppError, AppResult},
    models::domain::Submission,
    repositories::quiz_repository::duplicate_key_message,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn create(&self, submission: Submission) -> AppResult<Submission>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>>;
    async fn find_by_examinee(
        &self,
        examinee_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Submission>, i64)>;
    async fn has_submitted(&self, examinee_id: &str, quiz_id: &str) -> AppResult<bool>;
}

pub struct MongoSubmissionRepository {
    collection: Collection<Submission>,
}

impl MongoSubmissionRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.submissions(),
        }
    }
}

#[async_trait]
impl SubmissionRepository for MongoSubmissionRepository {
    async fn create(&self, submission: Submission) -> AppResult<Submission> {
        self.collection.insert_one(&submission).await.map_err(|e| {
            match duplicate_key_message(&e) {
                Some(message) => duplicate_submission(message, &submission),
                None => e.into(),
            }
        })?;
        Ok(submission)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>> {
        let submission = self.collection.find_one(doc! { "id": id }).await?;
        Ok(submission)
    }

    async fn find_by_examinee(
        &self,
        examinee_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Submission>, i64)> {
        let filter = doc! { "examinee_id": examinee_id };

        let total = self.collection.count_documents(filter.clone()).await?;

        let submissions = self
            .collection
            .find(filter)
            .skip(offset.max(0) as u64)
            .limit(limit)
            .sort(doc! { "submitted_at": -1 })
            .await?
            .try_collect()
            .await?;

        Ok((submissions, total as i64))
    }

    async fn has_submitted(&self, examinee_id: &str, quiz_id: &str) -> AppResult<bool> {
        let submission = self
            .collection
            .find_one(doc! {
                "examinee_id": examinee_id,
                "quiz_id": quiz_id
            })
            .await?;
        Ok(submission.is_some())
    }
}

/// Maps a duplicate-key message to the conflict the caller should see. The
/// unique `examinee_quiz` index only exists when resubmission is disabled.
fn duplicate_submission(message: &str, submission: &Submission) -> AppError {
    if message.contains(EXAMINEE_QUIZ_INDEX) {
        AppError::AlreadyExists(format!(
            "Quiz '{}' has already been submitted",
            submission.quiz_id
        ))
    } else {
        AppError::AlreadyExists(format!(
            "Submission with id '{}' already exists",
            submission.id
        ))
    }
}
