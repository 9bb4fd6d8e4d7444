//! 核心错误处理模块

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

/// 核心错误类型
#[derive(Debug)]
pub enum CoreError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    InternalServerError(String),
}

/// 错误响应结构
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

impl CoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Conflict(_) => StatusCode::CONFLICT,
            CoreError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::BadRequest(msg) => write!(f, "请求无效: {}", msg),
            CoreError::NotFound(msg) => write!(f, "未找到: {}", msg),
            CoreError::Conflict(msg) => write!(f, "冲突: {}", msg),
            CoreError::InternalServerError(msg) => write!(f, "内部错误: {}", msg),
        }
    }
}

impl std::error::Error for CoreError {}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_message, user_message) = match self {
            CoreError::BadRequest(msg) => ("BAD_REQUEST", msg),
            CoreError::NotFound(msg) => ("NOT_FOUND", msg),
            CoreError::Conflict(msg) => ("CONFLICT", msg),
            CoreError::InternalServerError(msg) => {
                error!("Internal error: {}", msg);
                ("INTERNAL_SERVER_ERROR", "服务器内部错误".to_string())
            }
        };

        let error_response = ErrorResponse {
            error: error_message.to_string(),
            message: user_message,
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for CoreError {
    fn from(e: sqlx::Error) -> Self {
        CoreError::InternalServerError(format!("数据库错误: {}", e))
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(e: validator::ValidationErrors) -> Self {
        CoreError::BadRequest(e.to_string())
    }
}

/// 请求体无法解析时同样返回统一的错误结构
impl From<JsonRejection> for CoreError {
    fn from(rejection: JsonRejection) -> Self {
        CoreError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(CoreError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(CoreError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(CoreError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(
            CoreError::InternalServerError("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_into_response_keeps_status() {
        let response = CoreError::NotFound("产品不存在".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
