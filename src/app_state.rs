use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoQuizRepository, MongoSubmissionRepository, QuizRepository, SubmissionRepository,
    },
    services::{QuizService, SubmissionService},
    storage::{LocalMediaStore, MediaStore},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub submission_service: Arc<SubmissionService>,
    pub media_store: Arc<dyn MediaStore>,
    pub jwt_service: JwtService,
    pub config: Arc<Config>,
    /// `None` when running on non-Mongo repositories.
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;
        db.ensure_indexes(!config.allow_resubmission).await?;

        let quiz_repository = MongoQuizRepository::new(&db);
        let submission_repository = MongoSubmissionRepository::new(&db);

        let media_store = LocalMediaStore::new(&config.upload_dir, &config.media_base_url);
        media_store.ensure_root().await?;

        let mut state = Self::from_parts(
            config,
            Arc::new(quiz_repository),
            Arc::new(submission_repository),
            Arc::new(media_store),
        );
        state.db = Some(db);
        Ok(state)
    }

    /// Wires services over the given collaborators.
    pub fn from_parts(
        config: Config,
        quiz_repository: Arc<dyn QuizRepository>,
        submission_repository: Arc<dyn SubmissionRepository>,
        media_store: Arc<dyn MediaStore>,
    ) -> Self {
        let quiz_service = Arc::new(QuizService::new(
            quiz_repository.clone(),
            media_store.clone(),
        ));
        let submission_service = Arc::new(SubmissionService::new(
            quiz_repository,
            submission_repository,
            config.allow_resubmission,
        ));
        let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);

        Self {
            quiz_service,
            submission_service,
            media_store,
            jwt_service,
            config: Arc::new(config),
            db: None,
        }
    }
}
