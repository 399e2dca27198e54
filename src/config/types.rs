//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::{GenerationLimits, RetryPolicy};
use crate::domain::theme::DEFAULT_THEME_ID;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 生成式模型后端配置
    #[serde(default)]
    pub backend: BackendConfig,

    /// 重试策略
    #[serde(default)]
    pub retry: RetryConfig,

    /// 生成参数
    #[serde(default)]
    pub generation: GenerationConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 渲染配置
    #[serde(default)]
    pub render: RenderConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 后端实现
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendProvider {
    /// Gemini generateContent API
    #[default]
    Gemini,
    /// 不联网；每个阶段都拿不到结构，流水线使用合成文档
    Offline,
}

impl BackendProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendProvider::Gemini => "gemini",
            BackendProvider::Offline => "offline",
        }
    }
}

/// 生成式模型后端配置
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub provider: BackendProvider,

    /// API 基础 URL
    #[serde(default = "default_backend_url")]
    pub base_url: String,

    /// API Key（建议用环境变量 DECKGEN_BACKEND__API_KEY 注入）
    #[serde(default)]
    pub api_key: String,

    /// 主模型
    #[serde(default = "default_model")]
    pub model: String,

    /// 备用模型，主模型过载时切换；为空表示不切换
    #[serde(default)]
    pub fallback_model: Option<String>,

    /// 请求超时时间（秒）
    #[serde(default = "default_backend_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_backend_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_backend_timeout() -> u64 {
    120
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: BackendProvider::default(),
            base_url: default_backend_url(),
            api_key: String::new(),
            model: default_model(),
            fallback_model: None,
            timeout_secs: default_backend_timeout(),
            temperature: default_temperature(),
        }
    }
}

/// 重试策略配置
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    #[serde(default = "default_backoff")]
    pub backoff: f64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    2000
}

fn default_backoff() -> f64 {
    2.0
}

fn default_max_delay_ms() -> u64 {
    60_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            backoff: default_backoff(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.base_delay_ms),
            backoff: self.backoff,
            max_delay: Duration::from_millis(self.max_delay_ms),
        }
    }
}

/// 生成参数
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_slides")]
    pub default_slides: usize,

    #[serde(default = "default_max_slides")]
    pub max_slides: usize,

    #[serde(default = "default_theme")]
    pub default_theme: String,

    /// 最大并发生成数
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// 待生成队列容量
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_slides() -> usize {
    5
}

fn default_max_slides() -> usize {
    20
}

fn default_theme() -> String {
    DEFAULT_THEME_ID.to_string()
}

fn default_max_concurrent() -> usize {
    4
}

fn default_queue_capacity() -> usize {
    256
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_slides: default_slides(),
            max_slides: default_max_slides(),
            default_theme: default_theme(),
            max_concurrent: default_max_concurrent(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl GenerationConfig {
    pub fn limits(&self) -> GenerationLimits {
        GenerationLimits {
            default_slides: self.default_slides,
            max_slides: self.max_slides,
            default_theme: self.default_theme.clone(),
        }
    }
}

/// 项目快照存储实现
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// 每个项目一个 JSON 文件
    #[default]
    File,
    Sled,
    /// 进程内，重启即丢失
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::File => "file",
            StorageBackend::Sled => "sled",
            StorageBackend::Memory => "memory",
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// 项目快照目录（file: JSON 文件；sled: 数据库目录）
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    /// 产物目录
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,
}

fn default_state_dir() -> PathBuf {
    PathBuf::from("data/projects")
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("data/presentations")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            state_dir: default_state_dir(),
            artifacts_dir: default_artifacts_dir(),
        }
    }
}

/// 渲染配置
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// 关闭后背景一律使用纯色
    #[serde(default = "default_gradients")]
    pub gradients: bool,
}

fn default_gradients() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            gradients: default_gradients(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.addr(), "0.0.0.0:5000");
        assert_eq!(config.backend.provider, BackendProvider::Gemini);
        assert_eq!(config.backend.model, "gemini-2.5-flash");
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.generation.default_theme, "corporate_blue");
        assert!(config.render.gradients);
    }

    #[test]
    fn test_retry_policy_conversion() {
        let policy = RetryConfig::default().policy();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(2000));
        assert_eq!(policy.max_delay, Duration::from_secs(60));
    }

    #[test]
    fn test_enums_deserialize_lowercase() {
        let provider: BackendProvider = serde_json::from_str("\"offline\"").unwrap();
        assert_eq!(provider, BackendProvider::Offline);
        let storage: StorageBackend = serde_json::from_str("\"sled\"").unwrap();
        assert_eq!(storage, StorageBackend::Sled);
    }
}
