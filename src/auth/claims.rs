use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{Principal, Role};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (principal id)
    pub role: Role,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn new(principal: &Principal, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: principal.id.clone(),
            role: principal.role,
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }

    pub fn principal(&self) -> Principal {
        Principal::new(&self.sub, self.role)
    }
}
