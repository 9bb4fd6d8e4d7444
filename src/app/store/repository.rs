//! 商品存储：内存实现与 PostgreSQL 实现

use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::{sort_products, Category, Product};
use crate::core::error::CoreError;
use crate::core::slug::Slug;

#[cfg(feature = "database")]
use sqlx::postgres::PgPool;

#[derive(Clone)]
pub enum ProductStore {
    Memory(MemoryCatalog),
    #[cfg(feature = "database")]
    Postgres(PgPool),
}

#[derive(Default)]
struct CatalogData {
    categories: Vec<Category>,
    products: Vec<Product>,
}

/// 内存商品目录
#[derive(Clone, Default)]
pub struct MemoryCatalog {
    inner: Arc<RwLock<CatalogData>>,
}

#[cfg(feature = "database")]
const PRODUCT_COLUMNS: &str = "id, category_id, name, slug, description, price, created_at";

#[cfg(feature = "database")]
fn map_insert_error(e: sqlx::Error, what: &str, slug: &str) -> CoreError {
    let unique = e
        .as_database_error()
        .map_or(false, |db| db.is_unique_violation());
    if unique {
        CoreError::Conflict(format!("{} slug 已存在: {}", what, slug))
    } else {
        e.into()
    }
}

impl ProductStore {
    pub fn memory() -> Self {
        ProductStore::Memory(MemoryCatalog::default())
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, CoreError> {
        match self {
            ProductStore::Memory(catalog) => {
                let data = catalog.inner.read().await;
                let mut products = data.products.clone();
                sort_products(&mut products);
                Ok(products)
            }
            #[cfg(feature = "database")]
            ProductStore::Postgres(pool) => {
                let sql = format!(
                    "SELECT {} FROM products ORDER BY created_at, name",
                    PRODUCT_COLUMNS
                );
                Ok(sqlx::query_as::<_, Product>(&sql).fetch_all(pool).await?)
            }
        }
    }

    pub async fn find_product(&self, slug: &Slug) -> Result<Option<Product>, CoreError> {
        match self {
            ProductStore::Memory(catalog) => {
                let data = catalog.inner.read().await;
                Ok(data
                    .products
                    .iter()
                    .find(|p| p.slug == slug.as_str())
                    .cloned())
            }
            #[cfg(feature = "database")]
            ProductStore::Postgres(pool) => {
                let sql = format!("SELECT {} FROM products WHERE slug = $1", PRODUCT_COLUMNS);
                Ok(sqlx::query_as::<_, Product>(&sql)
                    .bind(slug.as_str())
                    .fetch_optional(pool)
                    .await?)
            }
        }
    }

    pub async fn find_category(&self, slug: &Slug) -> Result<Option<Category>, CoreError> {
        match self {
            ProductStore::Memory(catalog) => {
                let data = catalog.inner.read().await;
                Ok(data
                    .categories
                    .iter()
                    .find(|c| c.slug == slug.as_str())
                    .cloned())
            }
            #[cfg(feature = "database")]
            ProductStore::Postgres(pool) => Ok(sqlx::query_as::<_, Category>(
                "SELECT id, name, slug FROM categories WHERE slug = $1",
            )
            .bind(slug.as_str())
            .fetch_optional(pool)
            .await?),
        }
    }

    pub async fn products_in_category(&self, category_id: Uuid) -> Result<Vec<Product>, CoreError> {
        match self {
            ProductStore::Memory(catalog) => {
                let data = catalog.inner.read().await;
                let mut products: Vec<Product> = data
                    .products
                    .iter()
                    .filter(|p| p.category_id == Some(category_id))
                    .cloned()
                    .collect();
                sort_products(&mut products);
                Ok(products)
            }
            #[cfg(feature = "database")]
            ProductStore::Postgres(pool) => {
                let sql = format!(
                    "SELECT {} FROM products WHERE category_id = $1 ORDER BY created_at, name",
                    PRODUCT_COLUMNS
                );
                Ok(sqlx::query_as::<_, Product>(&sql)
                    .bind(category_id)
                    .fetch_all(pool)
                    .await?)
            }
        }
    }

    pub async fn insert_category(&self, category: &Category) -> Result<(), CoreError> {
        match self {
            ProductStore::Memory(catalog) => {
                let mut data = catalog.inner.write().await;
                if data.categories.iter().any(|c| c.slug == category.slug) {
                    return Err(CoreError::Conflict(format!(
                        "分类 slug 已存在: {}",
                        category.slug
                    )));
                }
                data.categories.push(category.clone());
                Ok(())
            }
            #[cfg(feature = "database")]
            ProductStore::Postgres(pool) => {
                sqlx::query("INSERT INTO categories (id, name, slug) VALUES ($1, $2, $3)")
                    .bind(category.id)
                    .bind(&category.name)
                    .bind(&category.slug)
                    .execute(pool)
                    .await
                    .map_err(|e| map_insert_error(e, "分类", &category.slug))?;
                Ok(())
            }
        }
    }

    pub async fn insert_product(&self, product: &Product) -> Result<(), CoreError> {
        match self {
            ProductStore::Memory(catalog) => {
                let mut data = catalog.inner.write().await;
                if data.products.iter().any(|p| p.slug == product.slug) {
                    return Err(CoreError::Conflict(format!(
                        "商品 slug 已存在: {}",
                        product.slug
                    )));
                }
                data.products.push(product.clone());
                Ok(())
            }
            #[cfg(feature = "database")]
            ProductStore::Postgres(pool) => {
                sqlx::query(
                    "INSERT INTO products (id, category_id, name, slug, description, price, created_at) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7)",
                )
                .bind(product.id)
                .bind(product.category_id)
                .bind(&product.name)
                .bind(&product.slug)
                .bind(&product.description)
                .bind(product.price)
                .bind(product.created_at)
                .execute(pool)
                .await
                .map_err(|e| map_insert_error(e, "商品", &product.slug))?;
                Ok(())
            }
        }
    }
}
