//! 账户处理器

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use super::model::{Customer, RegisterForm, RegisterRequest};
use crate::app::AppState;
use crate::core::{error::CoreError, response::ApiResponse};

/// 注册页：表单说明
pub async fn register_form(State(state): State<AppState>) -> Json<ApiResponse<RegisterForm>> {
    Json(ApiResponse::success(state.account_service.register_form()))
}

/// 提交注册
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Customer>>), CoreError> {
    let Json(payload) = payload?;
    let customer = state.account_service.register(payload).await?;
    Ok(ApiResponse::created(customer))
}
