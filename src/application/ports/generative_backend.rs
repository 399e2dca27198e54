//! Generative Backend Port - 生成式模型后端抽象
//!
//! 后端客户端把响应体转换为文本只在适配器内部完成一次，
//! 流水线只通过 `BackendOutput::text` 读取结果

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::project::Stage;

/// 后端错误
///
/// 消息文本会被 Invoker 用来判断是否属于过载类错误，
/// 适配器应尽量保留原始状态行和响应体
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout after {0}s")]
    Timeout(u64),

    /// 非 2xx 响应，`status` 形如 `503 Service Unavailable`
    #[error("{status}: {body}")]
    Status { status: String, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Backend not configured: {0}")]
    NotConfigured(String),
}

/// 后端角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendRole {
    Primary,
    Fallback,
}

impl BackendRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendRole::Primary => "primary",
            BackendRole::Fallback => "fallback",
        }
    }
}

/// 一次调用的输入
#[derive(Debug, Clone)]
pub struct PromptContext {
    pub stage: Stage,
    pub prompt: String,
}

impl PromptContext {
    pub fn new(stage: Stage, prompt: impl Into<String>) -> Self {
        Self {
            stage,
            prompt: prompt.into(),
        }
    }
}

/// 一次调用的输出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendOutput {
    text: String,
    model: String,
}

impl BackendOutput {
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
        }
    }

    /// 唯一的文本访问入口
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Generative Backend Port
#[async_trait]
pub trait GenerativeBackendPort: Send + Sync {
    /// 执行一次生成
    async fn generate(&self, context: &PromptContext) -> Result<BackendOutput, BackendError>;

    /// 模型名（日志和进度消息用）
    fn model(&self) -> &str;
}

/// 后端工厂：按角色构造客户端
///
/// 备用后端由流水线按需创建，每次运行最多一次
pub trait BackendFactoryPort: Send + Sync {
    fn create(&self, role: BackendRole) -> Result<Arc<dyn GenerativeBackendPort>, BackendError>;
}
