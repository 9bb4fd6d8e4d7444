//! 商店数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::routes::{reverse, RouteName};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Product {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// 商品详情页路径
    pub fn absolute_url(&self) -> Option<String> {
        reverse(RouteName::ProductInfo.name(), &[&self.slug])
    }
}

/// 对外输出的商品，附带详情页链接
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub url: Option<String>,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        let url = product.absolute_url();
        Self { product, url }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryListing {
    pub category: Category,
    pub products: Vec<ProductView>,
}

/// 新建商品参数，slug 由名称生成
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_slug: Option<String>,
}

/// 按创建时间、名称排序
pub fn sort_products(products: &mut [Product]) {
    products.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.name.cmp(&b.name))
    });
}
