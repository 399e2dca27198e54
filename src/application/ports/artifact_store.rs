//! Artifact Store Port - 产物文件存储

use std::path::PathBuf;

use async_trait::async_trait;

use super::StoreError;
use crate::domain::project::{ArtifactFormat, ProjectId};

/// Artifact Store Port
#[async_trait]
pub trait ArtifactStorePort: Send + Sync {
    /// 产物路径（由项目 ID 和格式决定）
    fn path_for(&self, id: &ProjectId, format: ArtifactFormat) -> PathBuf;

    /// 写入产物，返回最终路径
    async fn write(
        &self,
        id: &ProjectId,
        format: ArtifactFormat,
        bytes: &[u8],
    ) -> Result<PathBuf, StoreError>;

    /// 删除项目的全部产物，返回是否删除了文件
    async fn delete(&self, id: &ProjectId) -> Result<bool, StoreError>;
}
