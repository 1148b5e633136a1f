use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/ready")]
pub async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let db_status = match &state.db {
        Some(db) => match db.health_check().await {
            Ok(()) => "ok",
            Err(err) => {
                log::warn!("MongoDB health check failed: {}", err);
                "error"
            }
        },
        None => "not_configured",
    };

    let ready = db_status != "error";
    let response = serde_json::json!({
        "status": if ready { "ready" } else { "not_ready" },
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "mongodb": db_status
        }
    });

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
