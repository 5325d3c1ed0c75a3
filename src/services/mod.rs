//! 业务逻辑服务层

pub mod analytics_service;
pub mod auth_service;
pub mod user_service;

pub use analytics_service::AnalyticsService;
pub use auth_service::AuthService;
pub use user_service::UserService;
