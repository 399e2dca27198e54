//! File-based Project Store
//!
//! 每个项目一个 JSON 快照文件: `{state_dir}/{project_id}.json`。
//! 先写临时文件再 rename，读取方不会看到写了一半的快照

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{ProjectStorePort, StoreError};
use crate::domain::project::{ProjectId, ProjectState};

/// 文件快照存储
pub struct FileProjectStore {
    dir: PathBuf,
}

impl FileProjectStore {
    /// 打开存储目录（不存在时创建）
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await?;
        tracing::info!(dir = %dir.display(), "FileProjectStore initialized");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn snapshot_path(&self, id: &ProjectId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    async fn read_snapshot(path: &Path) -> Result<ProjectState, StoreError> {
        let bytes = fs::read(path).await?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl ProjectStorePort for FileProjectStore {
    async fn load(&self, id: &ProjectId) -> Result<Option<ProjectState>, StoreError> {
        let path = self.snapshot_path(id);
        match Self::read_snapshot(&path).await {
            Ok(state) => Ok(Some(state)),
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn save(&self, state: &ProjectState) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(state)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let path = self.snapshot_path(state.id());
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &json).await?;
        fs::rename(&tmp, &path).await?;

        tracing::trace!(project_id = %state.id(), bytes = json.len(), "Snapshot saved");
        Ok(())
    }

    async fn delete(&self, id: &ProjectId) -> Result<bool, StoreError> {
        match fs::remove_file(self.snapshot_path(id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<ProjectState>, StoreError> {
        let mut states = Vec::new();
        let mut entries = fs::read_dir(&self.dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match Self::read_snapshot(&path).await {
                Ok(state) => states.push(state),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable snapshot");
                }
            }
        }

        states.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::GenerationRequest;
    use tempfile::tempdir;

    fn state(topic: &str) -> ProjectState {
        let req = GenerationRequest::new(ProjectId::new(), topic, 3, "corporate_blue").unwrap();
        ProjectState::new(&req)
    }

    #[tokio::test]
    async fn test_save_load_delete() {
        let dir = tempdir().unwrap();
        let store = FileProjectStore::open(dir.path().join("state")).await.unwrap();
        let mut s = state("Snapshot");

        store.save(&s).await.unwrap();
        s.start().unwrap();
        store.save(&s).await.unwrap();

        let loaded = store.load(s.id()).await.unwrap().unwrap();
        assert_eq!(loaded, s);
        assert!(!store.snapshot_path(s.id()).with_extension("json.tmp").exists());

        assert!(store.delete(s.id()).await.unwrap());
        assert!(!store.delete(s.id()).await.unwrap());
        assert!(store.load(s.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_skips_corrupt_files() {
        let dir = tempdir().unwrap();
        let store = FileProjectStore::open(dir.path()).await.unwrap();
        store.save(&state("A")).await.unwrap();
        store.save(&state("B")).await.unwrap();
        std::fs::write(dir.path().join("broken.json"), b"{not json").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let states = store.list().await.unwrap();
        assert_eq!(states.len(), 2);
    }

    #[tokio::test]
    async fn test_snapshot_survives_reopen() {
        let dir = tempdir().unwrap();
        let s = state("Persistent");
        {
            let store = FileProjectStore::open(dir.path()).await.unwrap();
            store.save(&s).await.unwrap();
        }
        let store = FileProjectStore::open(dir.path()).await.unwrap();
        assert_eq!(store.load(s.id()).await.unwrap(), Some(s));
    }
}
