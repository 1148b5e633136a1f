use std::sync::Arc;

use crate::{
    auth::{require_examinee, require_owner_or_admin},
    errors::{AppError, AppResult},
    models::domain::{Principal, Submission, SubmittedAnswer},
    repositories::{QuizRepository, SubmissionRepository},
    services::assessment_engine::AssessmentEngine,
};

pub struct SubmissionService {
    quiz_repository: Arc<dyn QuizRepository>,
    submission_repository: Arc<dyn SubmissionRepository>,
    allow_resubmission: bool,
}

impl SubmissionService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        submission_repository: Arc<dyn SubmissionRepository>,
        allow_resubmission: bool,
    ) -> Self {
        Self {
            quiz_repository,
            submission_repository,
            allow_resubmission,
        }
    }

    /// Scores `answers` against the stored quiz and records the result.
    pub async fn submit(
        &self,
        principal: &Principal,
        quiz_id: &str,
        answers: &[SubmittedAnswer],
    ) -> AppResult<Submission> {
        require_examinee(principal)?;

        let quiz = self
            .quiz_repository
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        // fast path; the unique index still decides concurrent submits
        if !self.allow_resubmission
            && self
                .submission_repository
                .has_submitted(&principal.id, quiz_id)
                .await?
        {
            return Err(AppError::AlreadyExists(format!(
                "Quiz '{}' has already been submitted",
                quiz_id
            )));
        }

        let submission = AssessmentEngine::score(&quiz, answers, &principal.id).map_err(|err| {
            log::warn!(
                "Rejected submission from {} for quiz {}: {}",
                principal.id,
                quiz_id,
                err
            );
            err
        })?;

        let submission = self
            .submission_repository
            .create(submission)
            .await
            .map_err(|err| {
                if let AppError::AlreadyExists(_) = err {
                    log::info!(
                        "Refused duplicate submission from {} for quiz {}",
                        principal.id,
                        quiz_id
                    );
                }
                err
            })?;
        log::info!(
            "Recorded submission {} for quiz {}: {}/{}",
            submission.id,
            quiz_id,
            submission.score,
            submission.question_count
        );
        Ok(submission)
    }

    pub async fn list_for_examinee(
        &self,
        principal: &Principal,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Submission>, i64)> {
        self.submission_repository
            .find_by_examinee(&principal.id, offset, limit)
            .await
    }

    pub async fn get_submission(&self, principal: &Principal, id: &str) -> AppResult<Submission> {
        let submission = self
            .submission_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Submission with id '{}' not found", id)))?;

        require_owner_or_admin(principal, &submission.examinee_id)?;
        Ok(submission)
    }
}
