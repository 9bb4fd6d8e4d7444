//! 路由表
//!
//! 每条路径只转发给一个处理器，参数原样传入。未声明的路径由 fallback 返回 404。
//! 不做末尾斜杠补全：`/register` 不匹配 `/register/`。

use axum::{middleware, routing::get, Router};

use crate::app::{account, store, AppState};
use crate::core::{error::CoreError, middleware::request_logging_middleware, slug::Slug};

/// 命名路由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteName {
    Store,
    Register,
    ProductInfo,
    ListCategory,
}

impl RouteName {
    pub const ALL: [RouteName; 4] = [
        RouteName::Store,
        RouteName::Register,
        RouteName::ProductInfo,
        RouteName::ListCategory,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RouteName::Store => "store",
            RouteName::Register => "register",
            RouteName::ProductInfo => "product-info",
            RouteName::ListCategory => "list-category",
        }
    }

    /// axum 路由模式
    pub fn pattern(self) -> &'static str {
        match self {
            RouteName::Store => "/",
            RouteName::Register => "/register/",
            RouteName::ProductInfo => "/product/:slug/",
            RouteName::ListCategory => "/search/:category_slug/",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }
}

/// 由路由名和参数生成路径
///
/// 名称未知、参数个数不符或参数不是合法 slug 时返回 `None`。
pub fn reverse(name: &str, args: &[&str]) -> Option<String> {
    let route = RouteName::from_name(name)?;
    let mut args = args.iter();
    let mut path = String::new();

    for segment in route.pattern().split('/').skip(1) {
        path.push('/');
        if segment.starts_with(':') {
            let arg = Slug::parse(args.next()?).ok()?;
            path.push_str(arg.as_str());
        } else {
            path.push_str(segment);
        }
    }

    if args.next().is_some() {
        return None;
    }
    Some(path)
}

async fn not_found() -> CoreError {
    CoreError::NotFound("请求的路径不存在".to_string())
}

/// 构建商城路由
pub fn url_patterns(state: AppState) -> Router {
    Router::new()
        // 商店首页
        .route(RouteName::Store.pattern(), get(store::handler::store))
        .route(
            RouteName::Register.pattern(),
            get(account::handler::register_form).post(account::handler::register),
        )
        // 单个商品
        .route(
            RouteName::ProductInfo.pattern(),
            get(store::handler::product_info),
        )
        // 单个分类
        .route(
            RouteName::ListCategory.pattern(),
            get(store::handler::list_category),
        )
        .fallback(not_found)
        .layer(middleware::from_fn(request_logging_middleware))
        .with_state(state)
}
