//! Gemini Backend Factory - 按角色构造主/备用模型客户端

use std::sync::Arc;

use super::gemini_client::{GeminiBackend, GeminiBackendConfig};
use crate::application::ports::{BackendError, BackendFactoryPort, BackendRole, GenerativeBackendPort};

/// 主模型与备用模型共享连接参数，只有模型名不同
pub struct GeminiBackendFactory {
    base: GeminiBackendConfig,
    fallback_model: Option<String>,
}

impl GeminiBackendFactory {
    pub fn new(base: GeminiBackendConfig, fallback_model: Option<String>) -> Self {
        Self {
            base,
            fallback_model: fallback_model.filter(|m| !m.trim().is_empty()),
        }
    }
}

impl BackendFactoryPort for GeminiBackendFactory {
    fn create(&self, role: BackendRole) -> Result<Arc<dyn GenerativeBackendPort>, BackendError> {
        let model = match role {
            BackendRole::Primary => self.base.model.clone(),
            BackendRole::Fallback => self
                .fallback_model
                .clone()
                .ok_or_else(|| BackendError::NotConfigured("no fallback model".to_string()))?,
        };

        tracing::info!(role = role.as_str(), model = %model, "Creating generative backend");

        let config = GeminiBackendConfig {
            model,
            ..self.base.clone()
        };
        Ok(Arc::new(GeminiBackend::new(config)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> GeminiBackendConfig {
        GeminiBackendConfig {
            api_key: "key".to_string(),
            model: "primary-model".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_roles_pick_models() {
        let factory = GeminiBackendFactory::new(base(), Some("fallback-model".to_string()));
        assert_eq!(factory.create(BackendRole::Primary).unwrap().model(), "primary-model");
        assert_eq!(factory.create(BackendRole::Fallback).unwrap().model(), "fallback-model");
    }

    #[test]
    fn test_missing_fallback_model() {
        let factory = GeminiBackendFactory::new(base(), Some("  ".to_string()));
        assert!(factory.create(BackendRole::Fallback).is_err());
    }
}
