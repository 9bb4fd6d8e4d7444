//! 统一的成功响应

use axum::{http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `{success, data, request_id, timestamp}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub request_id: String,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            request_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// 新建资源：201 加响应体
    pub fn created(data: T) -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Json(Self::success(data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_status() {
        let (status, Json(body)) = ApiResponse::created("ok");
        assert_eq!(status, StatusCode::CREATED);
        assert!(body.success);
        assert!(Uuid::parse_str(&body.request_id).is_ok());
    }
}
