use std::sync::Arc;

use crate::{
    auth::{require_admin, require_owner_or_admin},
    errors::{AppError, AppResult},
    models::{
        domain::{Principal, QuizDefinition, QuizPublicView, QuizSummary},
        dto::request::QuizDraft,
    },
    repositories::QuizRepository,
    services::{assessment_engine::AssessmentEngine, quiz_validator::QuizValidator},
    storage::{MediaKind, MediaStore},
};

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    media_store: Arc<dyn MediaStore>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>, media_store: Arc<dyn MediaStore>) -> Self {
        Self {
            repository,
            media_store,
        }
    }

    /// Validates an author's draft and stores it. Nothing is written unless
    /// every structural check passes.
    pub async fn create_quiz(&self, principal: &Principal, draft: QuizDraft) -> AppResult<QuizDefinition> {
        require_admin(principal)?;

        let quiz = QuizValidator::validate(draft, &principal.id).map_err(|err| {
            log::info!("Rejected quiz draft from {}: {}", principal.id, err);
            err
        })?;

        let quiz = self.repository.create(quiz).await?;
        log::info!(
            "Created quiz {} '{}' with {} questions",
            quiz.id,
            quiz.title,
            quiz.question_count()
        );
        Ok(quiz)
    }

    pub async fn list_quizzes(&self, offset: i64, limit: i64) -> AppResult<(Vec<QuizSummary>, i64)> {
        self.repository.list_summaries(offset, limit).await
    }

    /// Loads the authoritative definition.
    pub async fn load_quiz(&self, id: &str) -> AppResult<QuizDefinition> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    /// Examinee view with media references resolved to fetchable URLs.
    pub async fn get_public_quiz(&self, id: &str) -> AppResult<QuizPublicView> {
        let quiz = self.load_quiz(id).await?;
        let store = &self.media_store;
        Ok(AssessmentEngine::project_public(&quiz).map_media_refs(|r| store.resolve(r)))
    }

    pub async fn get_definition(&self, principal: &Principal, id: &str) -> AppResult<QuizDefinition> {
        let quiz = self.load_quiz(id).await?;
        require_owner_or_admin(principal, &quiz.owner_id)?;
        Ok(quiz)
    }

    /// Stores question media and returns its kind, reference and public URL.
    pub async fn upload_media(
        &self,
        principal: &Principal,
        kind: &str,
        original_name: &str,
        bytes: Vec<u8>,
    ) -> AppResult<(MediaKind, String, String)> {
        require_admin(principal)?;
        let kind = MediaKind::parse(kind)?;

        let media_ref = self.media_store.store(kind, original_name, bytes).await?;
        let url = self.media_store.resolve(&media_ref);
        Ok((kind, media_ref, url))
    }
}
