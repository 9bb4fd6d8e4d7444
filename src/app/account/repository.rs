//! 顾客存储

use std::sync::Arc;
use tokio::sync::RwLock;

use super::model::Customer;
use crate::core::error::CoreError;

#[cfg(feature = "database")]
use sqlx::postgres::PgPool;

#[derive(Clone)]
pub enum CustomerStore {
    Memory(Arc<RwLock<Vec<Customer>>>),
    #[cfg(feature = "database")]
    Postgres(PgPool),
}

impl CustomerStore {
    pub fn memory() -> Self {
        CustomerStore::Memory(Arc::new(RwLock::new(Vec::new())))
    }

    /// 用户名或邮箱重复时返回 `Conflict`
    pub async fn insert(&self, customer: &Customer) -> Result<(), CoreError> {
        match self {
            CustomerStore::Memory(customers) => {
                let mut customers = customers.write().await;
                if customers.iter().any(|c| c.username == customer.username) {
                    return Err(CoreError::Conflict("用户名已存在".to_string()));
                }
                if customers.iter().any(|c| c.email == customer.email) {
                    return Err(CoreError::Conflict("邮箱地址已存在".to_string()));
                }
                customers.push(customer.clone());
                Ok(())
            }
            #[cfg(feature = "database")]
            CustomerStore::Postgres(pool) => {
                let result = sqlx::query(
                    "INSERT INTO customers (id, username, email, password_hash, created_at) \
                     VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(customer.id)
                .bind(&customer.username)
                .bind(&customer.email)
                .bind(&customer.password_hash)
                .bind(customer.created_at)
                .execute(pool)
                .await;

                match result {
                    Ok(_) => Ok(()),
                    Err(e) => {
                        let unique = e
                            .as_database_error()
                            .map_or(false, |db| db.is_unique_violation());
                        if unique {
                            Err(CoreError::Conflict("用户名或邮箱地址已存在".to_string()))
                        } else {
                            Err(e.into())
                        }
                    }
                }
            }
        }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Customer>, CoreError> {
        match self {
            CustomerStore::Memory(customers) => {
                let customers = customers.read().await;
                Ok(customers.iter().find(|c| c.username == username).cloned())
            }
            #[cfg(feature = "database")]
            CustomerStore::Postgres(pool) => Ok(sqlx::query_as::<_, Customer>(
                "SELECT id, username, email, password_hash, created_at FROM customers WHERE username = $1",
            )
            .bind(username)
            .fetch_optional(pool)
            .await?),
        }
    }
}
