//! 商店业务服务

use tracing::{debug, info};
use uuid::Uuid;

use super::model::{Category, CategoryListing, NewProduct, Product, ProductView};
use super::repository::ProductStore;
use crate::core::error::CoreError;
use crate::core::slug::{slugify, Slug};

#[derive(Clone)]
pub struct StoreService {
    store: ProductStore,
}

impl StoreService {
    pub fn new(store: ProductStore) -> Self {
        Self { store }
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, CoreError> {
        self.store.list_products().await
    }

    /// slug 按原样匹配；不合法或不存在都视为未找到
    pub async fn get_product(&self, raw_slug: &str) -> Result<Product, CoreError> {
        let slug = Slug::parse(raw_slug)
            .map_err(|_| CoreError::NotFound(format!("商品 {} 不存在", raw_slug)))?;

        self.store
            .find_product(&slug)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("商品 {} 不存在", raw_slug)))
    }

    pub async fn list_category(&self, raw_slug: &str) -> Result<CategoryListing, CoreError> {
        let slug = Slug::parse(raw_slug)
            .map_err(|_| CoreError::NotFound(format!("分类 {} 不存在", raw_slug)))?;

        let category = self
            .store
            .find_category(&slug)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("分类 {} 不存在", raw_slug)))?;

        let products = self
            .store
            .products_in_category(category.id)
            .await?
            .into_iter()
            .map(ProductView::from)
            .collect();

        Ok(CategoryListing { category, products })
    }

    pub async fn create_category(&self, name: &str) -> Result<Category, CoreError> {
        let slug = slugify(name)
            .ok_or_else(|| CoreError::BadRequest(format!("无法由名称生成 slug: {}", name)))?;

        let category = Category {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            slug: slug.into_inner(),
        };
        self.store.insert_category(&category).await?;
        Ok(category)
    }

    pub async fn create_product(&self, new: NewProduct) -> Result<Product, CoreError> {
        if new.name.trim().is_empty() {
            return Err(CoreError::BadRequest("商品名称不能为空".to_string()));
        }
        if !new.price.is_finite() || new.price < 0.0 {
            return Err(CoreError::BadRequest("商品价格无效".to_string()));
        }
        let slug = slugify(&new.name)
            .ok_or_else(|| CoreError::BadRequest(format!("无法由名称生成 slug: {}", new.name)))?;

        let category_id = match new.category_slug.as_deref() {
            Some(raw) => {
                let category_slug = Slug::parse(raw)
                    .map_err(|e| CoreError::BadRequest(format!("分类 slug 无效: {}", e)))?;
                let category = self
                    .store
                    .find_category(&category_slug)
                    .await?
                    .ok_or_else(|| CoreError::BadRequest(format!("分类 {} 不存在", raw)))?;
                Some(category.id)
            }
            None => None,
        };

        let product = Product {
            id: Uuid::new_v4(),
            category_id,
            name: new.name.trim().to_string(),
            slug: slug.into_inner(),
            description: new.description,
            price: new.price,
            created_at: chrono::Utc::now(),
        };
        self.store.insert_product(&product).await?;
        Ok(product)
    }

    /// 写入示例数据，已存在的 slug 会被跳过
    pub async fn seed_sample_data(&self) -> Result<(), CoreError> {
        for name in ["Shoes", "Accessories"] {
            match self.create_category(name).await {
                Ok(_) | Err(CoreError::Conflict(_)) => {}
                Err(e) => return Err(e),
            }
        }

        let samples = [
            ("Trail Runner", "Lightweight trail running shoe", 89.99, Some("shoes")),
            ("Canvas Sneaker", "Everyday canvas sneaker", 49.5, Some("shoes")),
            ("Leather Belt", "Full-grain leather belt", 35.0, Some("accessories")),
            ("Gift Card", "Store gift card", 25.0, None),
        ];

        let mut created = 0;
        for (name, description, price, category) in samples {
            let new = NewProduct {
                name: name.to_string(),
                description: description.to_string(),
                price,
                category_slug: category.map(str::to_string),
            };
            match self.create_product(new).await {
                Ok(product) => {
                    debug!("示例商品: {} -> {}", product.name, product.slug);
                    created += 1;
                }
                Err(CoreError::Conflict(_)) => {}
                Err(e) => return Err(e),
            }
        }

        info!("✅ 已初始化 {} 个示例商品", created);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> StoreService {
        StoreService::new(ProductStore::memory())
    }

    fn new_product(name: &str, category: Option<&str>) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: String::new(),
            price: 10.0,
            category_slug: category.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let service = service();
        let product = service.create_product(new_product("Blue Mug", None)).await.unwrap();
        assert_eq!(product.slug, "blue-mug");

        let found = service.get_product("blue-mug").await.unwrap();
        assert_eq!(found.id, product.id);
    }

    #[tokio::test]
    async fn test_get_product_is_case_sensitive() {
        let service = service();
        service.create_product(new_product("Blue Mug", None)).await.unwrap();

        assert!(matches!(
            service.get_product("Blue-Mug").await,
            Err(CoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_slug_is_not_found() {
        let service = service();
        assert!(matches!(
            service.get_product("blue mug").await,
            Err(CoreError::NotFound(_))
        ));
        assert!(matches!(
            service.list_category("").await,
            Err(CoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_slug_conflicts() {
        let service = service();
        service.create_product(new_product("Blue Mug", None)).await.unwrap();
        assert!(matches!(
            service.create_product(new_product("blue  mug", None)).await,
            Err(CoreError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_category_rejected() {
        let service = service();
        assert!(matches!(
            service.create_product(new_product("Hat", Some("hats"))).await,
            Err(CoreError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_list_category_filters_products() {
        let service = service();
        service.create_category("Kitchen").await.unwrap();
        service.create_product(new_product("Blue Mug", Some("kitchen"))).await.unwrap();
        service.create_product(new_product("Desk Lamp", None)).await.unwrap();

        let listing = service.list_category("kitchen").await.unwrap();
        assert_eq!(listing.category.name, "Kitchen");
        assert_eq!(listing.products.len(), 1);
        assert_eq!(listing.products[0].product.slug, "blue-mug");
        assert_eq!(listing.products[0].url.as_deref(), Some("/product/blue-mug/"));
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let service = service();
        service.seed_sample_data().await.unwrap();
        service.seed_sample_data().await.unwrap();

        let products = service.list_products().await.unwrap();
        assert_eq!(products.len(), 4);
        assert!(products.iter().any(|p| p.slug == "trail-runner"));
    }
}
