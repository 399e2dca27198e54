//! Generative Backend Adapters
//!
//! - GeminiBackend: HTTP 调用 generateContent
//! - ScriptedBackend: 按脚本回放结果（离线模式与测试）

mod factory;
mod gemini_client;
mod scripted;

pub use factory::GeminiBackendFactory;
pub use gemini_client::{extract_text, GeminiBackend, GeminiBackendConfig};
pub use scripted::{ScriptedBackend, ScriptedBackendFactory};
