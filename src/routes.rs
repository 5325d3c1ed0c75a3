//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::{
    auth::middleware::{require_role, session_auth_middleware},
    handlers,
    middleware::AppState,
    models::role::Role,
};

const ADMIN: &[Role] = &[Role::Admin];
const EMPLOYEE: &[Role] = &[Role::Employee];

/// 请求体上限（所有端点的载荷都很小）
const MAX_BODY_BYTES: usize = 64 * 1024;

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查与指标）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/metrics", get(handlers::metrics::metrics_export));

    // 认证路由（无需会话）
    let auth_routes = Router::new().route("/auth/login", post(handlers::auth::login));

    // 会话路由（任意已认证角色）
    let session_routes = Router::new()
        .route("/auth/session", get(handlers::auth::session))
        .route("/users", get(handlers::user::list_users))
        .route(
            "/users/{id}",
            // 读取对所有已认证用户开放；写操作仅限管理员
            get(handlers::user::get_user).merge(
                patch(handlers::user::update_user)
                    .delete(handlers::user::delete_user)
                    .route_layer(from_fn(require_role(ADMIN))),
            ),
        );

    // 管理员路由
    let admin_routes = Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route(
            "/analytics/employees",
            get(handlers::analytics::employee_analytics),
        )
        .route_layer(from_fn(require_role(ADMIN)));

    // 员工自助路由
    let employee_routes = Router::new()
        .route("/employees/me", patch(handlers::user::update_own_record))
        .route_layer(from_fn(require_role(EMPLOYEE)));

    // 受保护路由统一挂会话认证中间件
    let protected_routes = Router::new()
        .merge(session_routes)
        .merge(admin_routes)
        .merge(employee_routes)
        .layer(from_fn_with_state(
            state.auth_service.clone(),
            session_auth_middleware,
        ));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(protected_routes)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}
