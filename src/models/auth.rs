//! 认证相关模型

use crate::models::user::UserResponse;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 登录请求
///
/// 密码策略只在注册时执行；登录提交的任何密码都交给哈希验证，
/// 错误密码统一走 403 路径。
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub password: String,
}

/// 登录响应
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
}
