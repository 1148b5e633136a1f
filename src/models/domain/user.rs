use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
pub enum Role {
    Admin,
    Examinee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Examinee => "Examinee",
        }
    }
}

/// Identity handed over by the auth layer. The engine treats `id` as opaque.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Principal {
    pub id: String,
    pub role: Role,
}

impl Principal {
    pub fn new(id: &str, role: Role) -> Self {
        Principal {
            id: id.to_string(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
