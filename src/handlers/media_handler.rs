use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError};

#[get("/uploads/{file_name}")]
pub async fn serve_media(
    state: web::Data<AppState>,
    file_name: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let bytes = state.media_store.open(&file_name).await?;

    Ok(HttpResponse::Ok()
        .content_type(content_type_for(&file_name))
        .body(bytes))
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",
        "webm" => "audio/webm",
        _ => "application/octet-stream",
    }
}
