//! 账户数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub const USERNAME_MAX_LEN: u64 = 150;
pub const PASSWORD_MIN_LEN: u64 = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// 注册请求
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 150, message = "用户名长度必须在 1 到 150 个字符之间"))]
    pub username: String,

    #[validate(email(message = "请提供有效的邮箱地址"))]
    pub email: String,

    #[validate(length(min = 8, message = "密码至少需要 8 个字符"))]
    pub password1: String,

    pub password2: String,
}

/// 注册表单字段说明
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub kind: String,
    pub required: bool,
    pub help_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterForm {
    pub action: String,
    pub method: String,
    pub fields: Vec<FormField>,
}
