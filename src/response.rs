//! 统一服务响应信封
//! 每个服务操作无论成败都返回同一形状：{ success, message, data, statusCode }

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// 服务响应信封
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub status_code: u16,
}

impl<T: Serialize> ServiceResponse<T> {
    /// 成功响应
    pub fn success(message: impl Into<String>, data: T, status_code: StatusCode) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            status_code: status_code.as_u16(),
        }
    }

    /// 失败响应（data 为 null）
    pub fn failure(message: impl Into<String>, status_code: StatusCode) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            status_code: status_code.as_u16(),
        }
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let resp = ServiceResponse::success("Success", serde_json::json!({"id": 1}), StatusCode::OK);
        let value = serde_json::to_value(&resp).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "Success");
        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["data"]["id"], 1);
    }

    #[test]
    fn test_failure_envelope_has_null_data() {
        let resp: ServiceResponse<serde_json::Value> =
            ServiceResponse::failure("Not found", StatusCode::NOT_FOUND);
        let value = serde_json::to_value(&resp).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["statusCode"], 404);
        assert!(value["data"].is_null());
    }
}
