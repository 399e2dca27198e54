//! 流水线错误

use thiserror::Error;

use crate::application::ports::{BackendError, RenderError, StoreError};
use crate::domain::project::ProjectError;

/// 一次生成运行的失败原因
///
/// 只有后端拒绝和渲染失败是面向用户的失败；
/// 过载在重试和备用后端都用尽后才会出现
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Backend overloaded: {0}")]
    BackendOverloaded(BackendError),

    #[error("Backend rejected request: {0}")]
    BackendRejected(BackendError),

    #[error("Render failed: {0}")]
    RenderFailure(#[from] RenderError),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Invalid project state: {0}")]
    InvalidState(#[from] ProjectError),

    #[error("Pipeline finished without a rendering stage")]
    Incomplete,
}
