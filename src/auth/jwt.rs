use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::claims::Claims,
    errors::{AppError, AppResult},
    models::domain::Principal,
};

/// Verifies bearer tokens issued by the identity provider. Issuing is only
/// here for tooling and tests; the service itself never hands out tokens.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration_hours: i64,
}

impl JwtService {
    pub fn new(secret: &SecretString, expiration_hours: i64) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation: Validation::default(),
            expiration_hours,
        }
    }

    pub fn create_token(&self, principal: &Principal) -> AppResult<String> {
        let claims = Claims::new(principal, self.expiration_hours);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to create JWT: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::Unauthorized("Token has expired".to_string()),
                ErrorKind::InvalidSignature => {
                    AppError::Unauthorized("Token signature is invalid".to_string())
                }
                _ => AppError::Unauthorized(format!("Invalid token: {}", e)),
            })
    }
}
