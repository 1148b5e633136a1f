use std::{env, path::PathBuf};

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub quizzes_collection: String,
    pub submissions_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub upload_dir: PathBuf,
    pub media_base_url: String,
    pub max_upload_bytes: usize,
    pub allow_resubmission: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "quiz-local".to_string()),
            quizzes_collection: env::var("QUIZZES_COLLECTION")
                .unwrap_or_else(|_| "quizzes".to_string()),
            submissions_collection: env::var("SUBMISSIONS_COLLECTION")
                .unwrap_or_else(|_| "submissions".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            ),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            media_base_url: env::var("MEDIA_BASE_URL").unwrap_or_default(),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|b| b.parse().ok())
                .unwrap_or(10 * 1024 * 1024),
            allow_resubmission: env::var("ALLOW_RESUBMISSION")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(true),
        }
    }

    /// Rejects configuration that must never reach production.
    pub fn validate_for_production(&self) -> AppResult<()> {
        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            return Err(AppError::InternalError(
                "JWT_SECRET is using the default value; set it to a secure random string"
                    .to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::InternalError(format!(
                "JWT_SECRET is too short ({}); it must be at least 32 characters",
                jwt_secret.len()
            )));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.web_server_host.clone(), self.web_server_port)
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quiz-test".to_string(),
            quizzes_collection: "quizzes".to_string(),
            submissions_collection: "submissions".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            upload_dir: std::env::temp_dir().join("quiz-server-test-uploads"),
            media_base_url: "http://localhost:8080".to_string(),
            max_upload_bytes: 1024,
            allow_resubmission: true,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
