//! File Persistence - 基于文件系统的快照与产物存储

mod artifact_store;
mod project_store;

pub use artifact_store::FileArtifactStore;
pub use project_store::FileProjectStore;
