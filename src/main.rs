use std::time::Duration;

use storefront::{
    config::{self, Config},
    infrastructure::logger::Logger,
    url_patterns, AppState,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::init_config()?;
    Logger::init(&config.logging.level);

    info!("启动商城服务...");

    let state = build_state(config).await?;
    if config.store.seed_sample_data {
        state.store_service.seed_sample_data().await?;
    }

    let app = url_patterns(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.http.timeout_seconds,
            ))),
    );

    let listener = TcpListener::bind(config.listen_addr()).await?;
    let addr = listener.local_addr()?;

    info!("🚀 商城服务运行在 http://{}", addr);
    info!("📖 路由:");
    info!("   GET       /                         - 商店首页");
    info!("   GET/POST  /register/                - 注册");
    info!("   GET       /product/:slug/           - 商品详情");
    info!("   GET       /search/:category_slug/   - 分类商品");

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(feature = "database")]
async fn build_state(config: &Config) -> Result<AppState, Box<dyn std::error::Error>> {
    use storefront::infrastructure::database::DatabaseManager;

    match config.database.url.as_deref() {
        Some(url) => {
            let db = DatabaseManager::new(url, &config.database)
                .await
                .map_err(|e| {
                    error!("Failed to initialize database: {}", e);
                    e
                })?;
            db.migrate().await?;
            info!("使用 PostgreSQL 存储");
            Ok(AppState::postgres(
                db.get_pool().clone(),
                config.account.password_iterations,
            ))
        }
        None => {
            info!("未配置数据库，使用内存存储");
            Ok(AppState::in_memory(config.account.password_iterations))
        }
    }
}

#[cfg(not(feature = "database"))]
async fn build_state(config: &Config) -> Result<AppState, Box<dyn std::error::Error>> {
    if config.database.url.is_some() {
        error!("已配置数据库地址，但未启用 database 特性，改用内存存储");
    }
    Ok(AppState::in_memory(config.account.password_iterations))
}
