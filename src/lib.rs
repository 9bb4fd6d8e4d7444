//! # 商城路由服务
//!
//! 基于 Axum 的分层结构：
//! - `routes`：路由表与命名路由反解
//! - `app`：商店与账户两个应用
//! - `core`：错误、响应、中间件、slug
//! - `infrastructure`：日志与数据库
//! - `config`：TOML 配置

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;
pub mod routes;

pub use app::AppState;
pub use routes::{reverse, url_patterns, RouteName};
