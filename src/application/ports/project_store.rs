//! Project Store Port - 项目状态快照持久化

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::project::{ProjectId, ProjectState};

/// 存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Project Store Port
///
/// 每个项目一条记录，保存完整的 ProjectState 快照
#[async_trait]
pub trait ProjectStorePort: Send + Sync {
    async fn load(&self, id: &ProjectId) -> Result<Option<ProjectState>, StoreError>;

    /// 覆盖写入快照
    async fn save(&self, state: &ProjectState) -> Result<(), StoreError>;

    /// 删除快照，返回是否存在过
    async fn delete(&self, id: &ProjectId) -> Result<bool, StoreError>;

    /// 全部快照（按创建时间倒序）
    async fn list(&self) -> Result<Vec<ProjectState>, StoreError>;
}
