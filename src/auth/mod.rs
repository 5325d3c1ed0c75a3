//! 认证与授权模块

pub mod middleware;
pub mod password;
pub mod token;

pub use middleware::{extract_token, require_role, session_auth_middleware};
pub use password::PasswordHasher;
pub use token::{TokenClaims, TokenCodec, TokenError};
