//! 用户名录的 HTTP 处理器

use crate::{
    error::AppError,
    middleware::AppState,
    models::role::Role,
    models::user::{EmployeeUpdateRequest, Identity, UpdateUserRequest},
    response::ServiceResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// 列表查询参数
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub role: Option<Role>,
}

/// 列出用户，可按角色过滤
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let users = match query.role {
        Some(role) => state.user_service.find_all_by_role(role).await?,
        None => state.user_service.find_all().await?,
    };

    Ok(ServiceResponse::success("Users found", users, StatusCode::OK))
}

/// 获取用户详情
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_service.find_by_id(id).await?;

    Ok(ServiceResponse::success("User found", user, StatusCode::OK))
}

/// 更新用户记录（管理员）
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = state.user_service.update_record(id, &req).await?;

    Ok(ServiceResponse::success("User updated", user, StatusCode::OK))
}

/// 删除用户（管理员）
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    // 不允许删除自己
    if id == identity.id {
        return Err(AppError::BadRequest(
            "Cannot delete your own account".to_string(),
        ));
    }

    state.user_service.delete(id).await?;

    Ok(ServiceResponse::<serde_json::Value>::success(
        "User deleted",
        serde_json::json!({}),
        StatusCode::OK,
    ))
}

/// 员工更新自己的记录（受限字段）
pub async fn update_own_record(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Json(req): Json<EmployeeUpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = state.user_service.update_self(identity.id, &req).await?;

    Ok(ServiceResponse::success("User updated", user, StatusCode::OK))
}
