//! Project Context - Errors

use thiserror::Error;

use super::{ProjectId, ProjectStatus};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("项目不存在: {0}")]
    NotFound(ProjectId),

    #[error("无效的项目 ID: {0}")]
    InvalidId(String),

    #[error("无效的生成请求: {0}")]
    InvalidRequest(String),

    #[error("非法状态迁移: {from} -> {to}")]
    InvalidTransition {
        from: ProjectStatus,
        to: ProjectStatus,
    },
}
