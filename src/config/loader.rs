//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, BackendProvider};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `DECKGEN_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `DECKGEN_SERVER__PORT=8080`
/// - `DECKGEN_BACKEND__API_KEY=...`
/// - `DECKGEN_BACKEND__PROVIDER=offline`
/// - `DECKGEN_STORAGE__BACKEND=sled`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("backend.provider", "gemini")?
        .set_default("backend.base_url", "https://generativelanguage.googleapis.com")?
        .set_default("backend.api_key", "")?
        .set_default("backend.model", "gemini-2.5-flash")?
        .set_default("backend.timeout_secs", 120)?
        .set_default("backend.temperature", 0.7)?
        .set_default("retry.max_retries", 3)?
        .set_default("retry.base_delay_ms", 2000)?
        .set_default("retry.backoff", 2.0)?
        .set_default("retry.max_delay_ms", 60_000)?
        .set_default("generation.default_slides", 5)?
        .set_default("generation.max_slides", 20)?
        .set_default("generation.default_theme", "corporate_blue")?
        .set_default("generation.max_concurrent", 4)?
        .set_default("generation.queue_capacity", 256)?
        .set_default("storage.backend", "file")?
        .set_default("storage.state_dir", "data/projects")?
        .set_default("storage.artifacts_dir", "data/presentations")?
        .set_default("render.gradients", true)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: DECKGEN_BACKEND__MODEL=gemini-2.5-pro
    // 注意: 环境变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("DECKGEN")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.backend.provider == BackendProvider::Gemini {
        if config.backend.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "Backend URL cannot be empty".to_string(),
            ));
        }
        if config.backend.model.is_empty() {
            return Err(ConfigError::ValidationError(
                "Backend model cannot be empty".to_string(),
            ));
        }
    }

    let generation = &config.generation;
    if generation.default_slides == 0 || generation.default_slides > generation.max_slides {
        return Err(ConfigError::ValidationError(format!(
            "Default slide count must be within 1..={}",
            generation.max_slides
        )));
    }
    if generation.max_concurrent == 0 || generation.queue_capacity == 0 {
        return Err(ConfigError::ValidationError(
            "Worker concurrency and queue capacity must be positive".to_string(),
        ));
    }

    if config.retry.backoff < 1.0 {
        return Err(ConfigError::ValidationError(
            "Retry backoff must be at least 1.0".to_string(),
        ));
    }
    if config.retry.max_delay_ms < config.retry.base_delay_ms {
        return Err(ConfigError::ValidationError(
            "Retry max delay cannot be shorter than base delay".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Backend Provider: {}", config.backend.provider.as_str());
    if config.backend.provider == BackendProvider::Gemini {
        tracing::info!("Backend URL: {}", config.backend.base_url);
        tracing::info!("Backend Model: {}", config.backend.model);
        if let Some(fallback) = &config.backend.fallback_model {
            tracing::info!("Fallback Model: {}", fallback);
        }
        tracing::info!("Backend Timeout: {}s", config.backend.timeout_secs);
        if config.backend.api_key.is_empty() {
            tracing::warn!("Backend API key is empty, requests will be rejected");
        }
    }
    tracing::info!(
        "Retry: max {} retries, base {}ms, backoff x{}, cap {}ms",
        config.retry.max_retries,
        config.retry.base_delay_ms,
        config.retry.backoff,
        config.retry.max_delay_ms
    );
    tracing::info!(
        "Slides: default {}, max {}",
        config.generation.default_slides,
        config.generation.max_slides
    );
    tracing::info!("Default Theme: {}", config.generation.default_theme);
    tracing::info!("Max Concurrent: {}", config.generation.max_concurrent);
    tracing::info!("Storage Backend: {}", config.storage.backend.as_str());
    tracing::info!("State Directory: {:?}", config.storage.state_dir);
    tracing::info!("Artifacts Directory: {:?}", config.storage.artifacts_dir);
    tracing::info!("Gradients: {}", config.render.gradients);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::StorageBackend;

    #[test]
    fn test_load_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_model() {
        let mut config = AppConfig::default();
        config.backend.model = String::new();
        assert!(validate_config(&config).is_err());

        config.backend.provider = BackendProvider::Offline;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_slide_bounds() {
        let mut config = AppConfig::default();
        config.generation.default_slides = 0;
        assert!(validate_config(&config).is_err());

        config.generation.default_slides = 25;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_retry_policy() {
        let mut config = AppConfig::default();
        config.retry.backoff = 0.5;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.retry.max_delay_ms = 100;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deckgen.toml");
        std::fs::write(
            &path,
            "[server]\nport = 8080\n\n[backend]\nprovider = \"offline\"\n\n[storage]\nbackend = \"memory\"\n",
        )
        .unwrap();

        let config = load_config_from_path(Some(&path)).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.backend.provider, BackendProvider::Offline);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.generation.max_slides, 20);
    }
}
