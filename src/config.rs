//! 配置模块
//!
//! 从 `config.toml` 或 `./config/config.toml` 加载，找不到时使用默认配置。
//! 环境变量 `DATABASE_URL` 覆盖 `database.url`。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::info;

use crate::app::account::password::DEFAULT_ITERATIONS;

/// 全局配置实例
static CONFIG: OnceLock<Config> = OnceLock::new();

/// 商城服务配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
    pub store: StoreConfig,
    pub account: AccountConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

/// 数据库配置，`url` 为空时使用内存存储
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
}

/// 商品目录配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// 启动时写入示例商品
    pub seed_sample_data: bool,
}

/// 账户配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// PBKDF2 迭代次数
    pub password_iterations: u32,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            password_iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8000,
            timeout_seconds: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 20,
            min_connections: 5,
            acquire_timeout_seconds: 8,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: true,
        }
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite(e.to_string()))?;
        }

        fs::write(path.as_ref(), content).map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }
        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::Validation("请求超时时间必须大于0".to_string()));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation("数据库最大连接数必须大于0".to_string()));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Validation(
                "数据库最小连接数不能大于最大连接数".to_string(),
            ));
        }

        if self.account.password_iterations == 0 {
            return Err(ConfigError::Validation("密码哈希迭代次数必须大于0".to_string()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }

    /// 监听地址，形如 `127.0.0.1:8000`
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.http.bind_address, self.http.port)
    }

    fn apply_env(mut self) -> Self {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.trim().is_empty() {
                self.database.url = Some(url);
            }
        }
        self
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("文件写入错误: {0}")]
    FileWrite(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置序列化错误: {0}")]
    Serialize(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 初始化全局配置
pub fn init_config() -> Result<&'static Config, ConfigError> {
    let config = load_config()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| ConfigError::Validation("配置已经初始化".to_string()))?;

    get_config().ok_or_else(|| ConfigError::Validation("配置未初始化".to_string()))
}

/// 从文件或默认值加载配置
pub fn load_config() -> Result<Config, ConfigError> {
    let config_paths = ["config.toml", "./config/config.toml"];

    for path in &config_paths {
        if Path::new(path).exists() {
            info!("从配置文件加载: {}", path);
            return Ok(Config::load_from_file(path)?.apply_env());
        }
    }

    info!("未找到配置文件，使用默认配置");
    Ok(Config::default().apply_env())
}

/// 获取全局配置实例
pub fn get_config() -> Option<&'static Config> {
    CONFIG.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.http.port, 8000);
        assert_eq!(config.logging.level, "info");
        assert!(config.database.url.is_none());
        assert!(config.store.seed_sample_data);
        assert_eq!(config.account.password_iterations, 600_000);
        assert_eq!(config.listen_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.database.min_connections = 50;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.account.password_iterations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_load() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config").join("config.toml");

        let mut config = Config::default();
        config.http.port = 9100;
        config.save_to_file(&config_path).unwrap();

        let loaded = Config::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.http.port, 9100);
        assert_eq!(loaded.logging.level, config.logging.level);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[http]\nport = 8100\n").unwrap();

        let loaded = Config::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.http.port, 8100);
        assert_eq!(loaded.http.bind_address, "127.0.0.1");
        assert_eq!(loaded.database.max_connections, 20);
    }
}
