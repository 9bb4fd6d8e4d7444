//! 请求日志中间件
//!
//! 每个请求记录一行：方法、路径、命中的路由模式、状态码与耗时，
//! 并通过 `x-request-id` 响应头回传请求编号。

use axum::{
    extract::{MatchedPath, Request},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let method = req.method().clone();
    let uri = req.uri().clone();
    // 未命中任何路由时为 None
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string());

    let mut response = next.run(req).await;
    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    if status.is_server_error() {
        warn!(%request_id, %method, %uri, ?route, status = status.as_u16(), elapsed_ms, "request failed");
    } else {
        info!(%request_id, %method, %uri, ?route, status = status.as_u16(), elapsed_ms, "request");
    }

    response
}
