//! 商店处理器

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Json,
};

use super::model::{CategoryListing, ProductView};
use crate::app::AppState;
use crate::core::{error::CoreError, response::ApiResponse};

/// 路径段无法解码（如非 UTF-8）时与 slug 不合法一样按未找到处理
fn slug_segment(
    path: Result<Path<String>, PathRejection>,
    what: &str,
) -> Result<String, CoreError> {
    path.map(|Path(slug)| slug)
        .map_err(|_| CoreError::NotFound(format!("{}不存在", what)))
}

/// 商店首页：全部商品
pub async fn store(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProductView>>>, CoreError> {
    let products = state.store_service.list_products().await?;
    let views = products.into_iter().map(ProductView::from).collect();
    Ok(Json(ApiResponse::success(views)))
}

/// 商品详情
pub async fn product_info(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<ProductView>>, CoreError> {
    let slug = slug_segment(path, "商品")?;
    let product = state.store_service.get_product(&slug).await?;
    Ok(Json(ApiResponse::success(product.into())))
}

/// 分类下的商品
pub async fn list_category(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<CategoryListing>>, CoreError> {
    let category_slug = slug_segment(path, "分类")?;
    let listing = state.store_service.list_category(&category_slug).await?;
    Ok(Json(ApiResponse::success(listing)))
}
