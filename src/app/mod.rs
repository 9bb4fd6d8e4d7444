//! 应用层

pub mod account;
pub mod store;

use account::{repository::CustomerStore, service::AccountService};
use store::{repository::ProductStore, service::StoreService};

#[derive(Clone)]
pub struct AppState {
    pub store_service: StoreService,
    pub account_service: AccountService,
}

impl AppState {
    pub fn new(products: ProductStore, customers: CustomerStore, password_iterations: u32) -> Self {
        Self {
            store_service: StoreService::new(products),
            account_service: AccountService::new(customers, password_iterations),
        }
    }

    /// 全内存状态
    pub fn in_memory(password_iterations: u32) -> Self {
        Self::new(
            ProductStore::memory(),
            CustomerStore::memory(),
            password_iterations,
        )
    }

    #[cfg(feature = "database")]
    pub fn postgres(pool: sqlx::postgres::PgPool, password_iterations: u32) -> Self {
        Self::new(
            ProductStore::Postgres(pool.clone()),
            CustomerStore::Postgres(pool),
            password_iterations,
        )
    }
}
