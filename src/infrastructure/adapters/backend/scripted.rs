//! Scripted Backend - 按脚本回放的后端
//!
//! 依次返回预设的结果，用完后返回默认结果（未设置时为空文本）。
//! 空文本在规范化时视为缺失结构，流水线会使用合成文档，
//! 因此不带脚本的实例可作为离线模式的后端

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::ports::{
    BackendError, BackendFactoryPort, BackendOutput, BackendRole, GenerativeBackendPort,
    PromptContext,
};
use crate::domain::project::Stage;

type Reply = Result<String, BackendError>;

/// 脚本后端
pub struct ScriptedBackend {
    model: String,
    script: Mutex<VecDeque<Reply>>,
    otherwise: Reply,
    calls: AtomicU32,
    stages: Mutex<Vec<Stage>>,
}

impl ScriptedBackend {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            script: Mutex::new(VecDeque::new()),
            otherwise: Ok(String::new()),
            calls: AtomicU32::new(0),
            stages: Mutex::new(Vec::new()),
        }
    }

    /// 追加一次成功回复
    pub fn with_reply(mut self, text: impl Into<String>) -> Self {
        self.script.get_mut().push_back(Ok(text.into()));
        self
    }

    /// 追加一次失败
    pub fn with_failure(mut self, err: BackendError) -> Self {
        self.script.get_mut().push_back(Err(err));
        self
    }

    /// 脚本用完后一直失败
    pub fn failing_with(mut self, err: BackendError) -> Self {
        self.otherwise = Err(err);
        self
    }

    /// 已收到的调用次数
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// 各次调用所属阶段
    pub async fn stages(&self) -> Vec<Stage> {
        self.stages.lock().await.clone()
    }
}

#[async_trait]
impl GenerativeBackendPort for ScriptedBackend {
    async fn generate(&self, context: &PromptContext) -> Result<BackendOutput, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.stages.lock().await.push(context.stage);

        let reply = self
            .script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| self.otherwise.clone());

        tracing::debug!(
            model = %self.model,
            stage = context.stage.as_str(),
            ok = reply.is_ok(),
            "Scripted backend reply"
        );
        reply.map(|text| BackendOutput::new(text, &self.model))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// 脚本后端工厂
#[derive(Clone)]
pub struct ScriptedBackendFactory {
    primary: Arc<ScriptedBackend>,
    fallback: Option<Arc<ScriptedBackend>>,
    fallbacks_created: Arc<AtomicU32>,
}

impl ScriptedBackendFactory {
    pub fn new(primary: Arc<ScriptedBackend>) -> Self {
        Self {
            primary,
            fallback: None,
            fallbacks_created: Arc::new(AtomicU32::new(0)),
        }
    }

    /// 离线模式：没有脚本，也没有备用后端
    pub fn offline() -> Self {
        Self::new(Arc::new(ScriptedBackend::new("offline")))
    }

    pub fn with_fallback(mut self, fallback: Arc<ScriptedBackend>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// 备用后端被创建的次数
    pub fn fallbacks_created(&self) -> u32 {
        self.fallbacks_created.load(Ordering::SeqCst)
    }
}

impl BackendFactoryPort for ScriptedBackendFactory {
    fn create(&self, role: BackendRole) -> Result<Arc<dyn GenerativeBackendPort>, BackendError> {
        match role {
            BackendRole::Primary => Ok(self.primary.clone()),
            BackendRole::Fallback => {
                let fallback = self
                    .fallback
                    .clone()
                    .ok_or_else(|| BackendError::NotConfigured("no fallback model".to_string()))?;
                self.fallbacks_created.fetch_add(1, Ordering::SeqCst);
                Ok(fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_then_default() {
        let backend = ScriptedBackend::new("m")
            .with_reply("first")
            .with_failure(BackendError::Network("down".into()));
        let ctx = PromptContext::new(Stage::Planning, "p");

        assert_eq!(backend.generate(&ctx).await.unwrap().text(), "first");
        assert!(backend.generate(&ctx).await.is_err());
        assert_eq!(backend.generate(&ctx).await.unwrap().text(), "");
        assert_eq!(backend.calls(), 3);
        assert_eq!(backend.stages().await, vec![Stage::Planning; 3]);
    }

    #[test]
    fn test_offline_factory_has_no_fallback() {
        let factory = ScriptedBackendFactory::offline();
        assert_eq!(factory.create(BackendRole::Primary).unwrap().model(), "offline");
        assert!(factory.create(BackendRole::Fallback).is_err());
        assert_eq!(factory.fallbacks_created(), 0);
    }
}
