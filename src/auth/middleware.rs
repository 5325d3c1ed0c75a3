//! 会话认证与角色授权中间件

use crate::{error::AppError, models::role::Role, models::user::Identity, services::AuthService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// 会话 Cookie 名称
pub const AUTH_COOKIE: &str = "auth_token";

// 实现 FromRequestParts 以便在 handler 中直接提取 Identity
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// 从请求中提取会话令牌
/// 优先 Authorization: Bearer，回退到会话 Cookie
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
    {
        return Some(token.to_string());
    }

    headers
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(extract_cookie_token)
}

/// 从 Cookie 头中取出会话令牌
fn extract_cookie_token(cookie_header: &str) -> Option<String> {
    cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == AUTH_COOKIE && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// 会话认证中间件 - 必须认证
///
/// 无令牌或验证失败时在此终止请求，后续 handler 不会执行。
/// 失败原因对外统一为 401，具体类型仅记录在日志。
pub async fn session_auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(req.headers()).ok_or(AppError::Unauthorized)?;

    let identity = auth_service.authenticate(&token).await?;

    // 附加到请求扩展
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// 角色授权中间件工厂
///
/// 每条路由在构建时传入固定的许可角色集合；
/// 请求时：无身份或角色不在集合内 -> 403 终止，否则放行。纯谓词，无副作用。
pub fn require_role(
    allowed: &'static [Role],
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Result<Response, AppError>> + Send>>
       + Clone
       + Send
       + 'static {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let identity = req
                .extensions()
                .get::<Identity>()
                .ok_or(AppError::Forbidden)?;

            if !allowed.contains(&identity.role) {
                tracing::debug!(
                    user_id = %identity.id,
                    role = %identity.role,
                    "Role not permitted for this route"
                );
                return Err(AppError::Forbidden);
            }

            Ok(next.run(req).await)
        })
    }
}
