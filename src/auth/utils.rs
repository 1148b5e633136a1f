use crate::{
    errors::{AppError, AppResult},
    models::domain::{Principal, Role},
};

pub fn require_admin(principal: &Principal) -> AppResult<()> {
    if principal.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can perform this action".to_string(),
        ));
    }
    Ok(())
}

pub fn require_examinee(principal: &Principal) -> AppResult<()> {
    if principal.role != Role::Examinee {
        return Err(AppError::Forbidden(
            "Only examinees can perform this action".to_string(),
        ));
    }
    Ok(())
}

pub fn require_owner_or_admin(principal: &Principal, resource_owner: &str) -> AppResult<()> {
    if principal.role != Role::Admin && principal.id != resource_owner {
        return Err(AppError::Forbidden(
            "You can only access your own resources".to_string(),
        ));
    }
    Ok(())
}
