//! 认证相关的 HTTP 处理器

use crate::{
    config::AppConfig,
    error::AppError,
    middleware::AppState,
    models::auth::LoginRequest,
    models::user::{Identity, RegisterRequest},
    response::ServiceResponse,
};
use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// 登录
///
/// 成功时返回 {user, token} 信封并设置会话 Cookie。
/// 未知邮箱与密码错误状态码不同（404/403），但对外文案统一，
/// 减少账号枚举价值。
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, AppError> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    match state.auth_service.login(&req.email, &req.password).await {
        Ok(login) => {
            let cookie = build_auth_cookie(&login.token, &state.config);

            let mut response =
                ServiceResponse::success("Success", login, StatusCode::OK).into_response();
            response.headers_mut().insert(
                header::SET_COOKIE,
                HeaderValue::from_str(&cookie).map_err(|_| AppError::Internal)?,
            );

            Ok(response)
        }
        Err(e @ (AppError::NotFound | AppError::InvalidCredentials)) => Ok(
            ServiceResponse::<serde_json::Value>::failure(
                "Invalid email or password",
                e.status_code(),
            )
            .into_response(),
        ),
        Err(e) => Err(e),
    }
}

/// 注册新员工（管理员路由）
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    // 密码下限由运行时配置决定，结构校验只保证绝对下限
    let min_length = state.config.security.password_min_length;
    if req.password.chars().count() < min_length {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters",
            min_length
        )));
    }

    let user = state.auth_service.register(req).await?;

    Ok(ServiceResponse::success(
        "User created",
        user,
        StatusCode::CREATED,
    ))
}

/// 当前会话身份
pub async fn session(identity: Identity) -> impl IntoResponse {
    ServiceResponse::success(
        "Success",
        json!({
            "id": identity.id,
            "email": identity.email,
            "role": identity.role,
        }),
        StatusCode::OK,
    )
}

/// 构建会话 Cookie
/// HttpOnly + SameSite=Strict + Path=/；非开发环境附加 Secure
fn build_auth_cookie(token: &str, config: &AppConfig) -> String {
    let mut cookie = format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Strict",
        crate::auth::middleware::AUTH_COOKIE,
        token,
        config.security.cookie_exp_secs
    );

    if !config.is_development() {
        cookie.push_str("; Secure");
    }

    cookie
}
