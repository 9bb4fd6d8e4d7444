//! 账户业务服务

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::model::{
    Customer, FormField, RegisterForm, RegisterRequest, PASSWORD_MIN_LEN, USERNAME_MAX_LEN,
};
use super::password::hash_password;
use super::repository::CustomerStore;
use crate::core::error::CoreError;
use crate::routes::{reverse, RouteName};

#[derive(Clone)]
pub struct AccountService {
    store: CustomerStore,
    password_iterations: u32,
}

/// 用户名允许字母、数字与 `@ . + - _`
fn is_username_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')
}

impl AccountService {
    pub fn new(store: CustomerStore, password_iterations: u32) -> Self {
        Self {
            store,
            password_iterations,
        }
    }

    pub fn register_form(&self) -> RegisterForm {
        let field = |name: &str, kind: &str, help_text: String| FormField {
            name: name.to_string(),
            kind: kind.to_string(),
            required: true,
            help_text,
        };

        RegisterForm {
            action: reverse(RouteName::Register.name(), &[]).unwrap_or_default(),
            method: "POST".to_string(),
            fields: vec![
                field(
                    "username",
                    "text",
                    format!(
                        "不超过 {} 个字符，仅限字母、数字和 @/./+/-/_",
                        USERNAME_MAX_LEN
                    ),
                ),
                field("email", "email", "有效的邮箱地址".to_string()),
                field(
                    "password1",
                    "password",
                    format!("至少 {} 个字符", PASSWORD_MIN_LEN),
                ),
                field("password2", "password", "再次输入相同的密码".to_string()),
            ],
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<Customer, CoreError> {
        let request = RegisterRequest {
            username: request.username.trim().to_string(),
            email: request.email.trim().to_lowercase(),
            ..request
        };
        request.validate()?;

        if let Some(c) = request.username.chars().find(|c| !is_username_char(*c)) {
            return Err(CoreError::BadRequest(format!("用户名包含非法字符: {:?}", c)));
        }
        if request.password1 != request.password2 {
            return Err(CoreError::BadRequest("两次输入的密码不一致".to_string()));
        }
        // 先查重再做耗时的哈希；并发注册仍由 insert 兜底
        if self.store.find_by_username(&request.username).await?.is_some() {
            return Err(CoreError::Conflict("用户名已存在".to_string()));
        }

        let customer = Customer {
            id: Uuid::new_v4(),
            username: request.username,
            email: request.email,
            password_hash: hash_password(&request.password1, self.password_iterations),
            created_at: chrono::Utc::now(),
        };
        self.store.insert(&customer).await?;

        info!("新顾客注册: {}", customer.username);
        Ok(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::account::password::verify_password;

    fn request(username: &str, email: &str, p1: &str, p2: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password1: p1.to_string(),
            password2: p2.to_string(),
        }
    }

    fn service() -> AccountService {
        AccountService::new(CustomerStore::memory(), 1_000)
    }

    #[tokio::test]
    async fn test_register_success() {
        let service = service();
        let customer = service
            .register(request(" alice ", "Alice@Example.com", "s3cretpass", "s3cretpass"))
            .await
            .unwrap();

        assert_eq!(customer.username, "alice");
        assert_eq!(customer.email, "alice@example.com");
        assert!(customer.password_hash.starts_with("pbkdf2_sha256$1000$"));

        let stored = service
            .store
            .find_by_username("alice")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, customer.id);
        assert!(verify_password("s3cretpass", &stored.password_hash));
        assert!(!verify_password("nope", &stored.password_hash));
    }

    #[tokio::test]
    async fn test_register_validation() {
        let service = service();
        let cases = [
            request("", "a@example.com", "s3cretpass", "s3cretpass"),
            request("alice", "not-an-email", "s3cretpass", "s3cretpass"),
            request("alice", "a@example.com", "short", "short"),
            request("alice", "a@example.com", "s3cretpass", "different1"),
            request("al ice", "a@example.com", "s3cretpass", "s3cretpass"),
            request(&"x".repeat(151), "a@example.com", "s3cretpass", "s3cretpass"),
        ];

        for case in cases {
            assert!(matches!(
                service.register(case).await,
                Err(CoreError::BadRequest(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_register_duplicates() {
        let service = service();
        service
            .register(request("alice", "alice@example.com", "s3cretpass", "s3cretpass"))
            .await
            .unwrap();

        assert!(matches!(
            service
                .register(request("alice", "other@example.com", "s3cretpass", "s3cretpass"))
                .await,
            Err(CoreError::Conflict(_))
        ));
        assert!(matches!(
            service
                .register(request("alice2", "ALICE@example.com", "s3cretpass", "s3cretpass"))
                .await,
            Err(CoreError::Conflict(_))
        ));
    }

    #[test]
    fn test_register_form_fields() {
        let form = service().register_form();
        assert_eq!(form.action, "/register/");
        let names: Vec<&str> = form.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["username", "email", "password1", "password2"]);
    }
}
