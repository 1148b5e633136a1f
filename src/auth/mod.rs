pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod utils;

pub use claims::Claims;
pub use jwt::JwtService;
pub use middleware::{AuthMiddleware, AuthenticatedUser};
pub use utils::{require_admin, require_examinee, require_owner_or_admin};
