use actix_web::{get, post, web, HttpResponse};
use futures::StreamExt;
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{PaginationParams, QuizDraft, UploadParams},
        response::{CreateQuizResponse, QuizListResponse, UploadResponse},
    },
};

#[post("/quizzes")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<QuizDraft>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .create_quiz(&auth.0, request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(CreateQuizResponse {
        data: quiz,
        message: "Quiz created successfully".to_string(),
    }))
}

#[get("/quizzes")]
pub async fn list_quizzes(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    pagination.validate()?;

    let (items, total) = state
        .quiz_service
        .list_quizzes(pagination.offset(), pagination.limit())
        .await?;

    Ok(HttpResponse::Ok().json(QuizListResponse {
        items,
        total,
        offset: pagination.offset(),
        limit: pagination.limit(),
    }))
}

#[post("/quizzes/upload")]
pub async fn upload_media(
    state: web::Data<AppState>,
    query: web::Query<UploadParams>,
    payload: web::Payload,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    params.validate()?;

    let bytes = read_limited(payload, state.config.max_upload_bytes).await?;
    let (kind, media_ref, url) = state
        .quiz_service
        .upload_media(&auth.0, &params.kind, &params.filename, bytes)
        .await?;

    Ok(HttpResponse::Ok().json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        media_ref,
        url,
        kind: kind.as_str(),
    }))
}

/// Collects the request body, stopping as soon as it exceeds `limit` bytes.
async fn read_limited(mut payload: web::Payload, limit: usize) -> Result<Vec<u8>, AppError> {
    let mut body = Vec::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| AppError::ValidationError(format!("Invalid upload body: {}", e)))?;
        if body.len() + chunk.len() > limit {
            return Err(AppError::PayloadTooLarge(format!(
                "Upload exceeds the {} byte limit",
                limit
            )));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

#[get("/quizzes/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_public_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[get("/quizzes/{id}/definition")]
pub async fn get_quiz_definition(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_definition(&auth.0, &id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}
