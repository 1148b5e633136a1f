use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{PaginationParams, SubmitAnswersRequest},
        response::{SubmissionDto, SubmissionListResponse, SubmitResponse},
    },
};

#[post("/submissions/{quiz_id}/submit")]
pub async fn submit_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    request: web::Json<SubmitAnswersRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let submission = state
        .submission_service
        .submit(&auth.0, &quiz_id, &request.answers)
        .await?;

    Ok(HttpResponse::Created().json(SubmitResponse::from(submission)))
}

#[get("/submissions/my")]
pub async fn my_submissions(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    pagination.validate()?;

    let (submissions, total) = state
        .submission_service
        .list_for_examinee(&auth.0, pagination.offset(), pagination.limit())
        .await?;

    Ok(HttpResponse::Ok().json(SubmissionListResponse {
        items: submissions.into_iter().map(SubmissionDto::from).collect(),
        total,
        offset: pagination.offset(),
        limit: pagination.limit(),
    }))
}

#[get("/submissions/{id}")]
pub async fn get_submission(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let submission = state.submission_service.get_submission(&auth.0, &id).await?;
    Ok(HttpResponse::Ok().json(SubmissionDto::from(submission)))
}
