//! 统计分析的 HTTP 处理器

use crate::{error::AppError, middleware::AppState, response::ServiceResponse};
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// 员工统计
pub async fn employee_analytics(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let analytics = state.analytics_service.employee_analytics().await?;

    Ok(ServiceResponse::success(
        "Success",
        analytics,
        StatusCode::OK,
    ))
}
