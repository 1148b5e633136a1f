pub mod health_handler;
pub mod media_handler;
pub mod quiz_handler;
pub mod submission_handler;

use actix_web::web;

use crate::{auth::AuthMiddleware, errors::AppError};

pub use health_handler::{health_check, health_check_ready};
pub use media_handler::serve_media;
pub use quiz_handler::{create_quiz, get_quiz, get_quiz_definition, list_quizzes, upload_media};
pub use submission_handler::{get_submission, my_submissions, submit_quiz};

/// Registers every route. Everything under `/api` requires a bearer token.
/// Body and query parse failures are reported as validation errors.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .service(health_check)
    .service(health_check_ready)
    .service(serve_media)
    .service(
        web::scope("/api")
            .wrap(AuthMiddleware)
            .service(create_quiz)
            .service(list_quizzes)
            .service(upload_media)
            .service(get_quiz)
            .service(get_quiz_definition)
            .service(submit_quiz)
            .service(my_submissions)
            .service(get_submission),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{test, App};

    use super::*;
    use crate::{
        app_state::AppState,
        config::Config,
        repositories::{
            quiz_repository::MockQuizRepository, submission_repository::MockSubmissionRepository,
        },
        storage::LocalMediaStore,
        test_utils::test_helpers::{assert_error_status, assert_success_status},
    };

    #[actix_web::test]
    async fn test_api_scope_is_guarded_and_health_is_open() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = Config::test_config();
        let media_store = LocalMediaStore::new(dir.path(), &config.media_base_url);
        let state = AppState::from_parts(
            config,
            Arc::new(MockQuizRepository::new()),
            Arc::new(MockSubmissionRepository::new()),
            Arc::new(media_store),
        );

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.jwt_service.clone()))
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        assert_success_status(test::call_service(&app, req).await.status());

        let req = test::TestRequest::get().uri("/api/quizzes").to_request();
        assert_error_status(test::call_service(&app, req).await.status());

        let req = test::TestRequest::get().uri("/uploads/..secret").to_request();
        assert_error_status(test::call_service(&app, req).await.status());
    }
}
