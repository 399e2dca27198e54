//! File-based Artifact Store
//!
//! 产物文件名只由项目 ID 和格式决定: `{artifacts_dir}/presentation_{id}.{ext}`

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{ArtifactStorePort, StoreError};
use crate::domain::project::{ArtifactFormat, ProjectId};

const FORMATS: [ArtifactFormat; 2] = [ArtifactFormat::Pptx, ArtifactFormat::Html];

/// 文件产物存储
pub struct FileArtifactStore {
    dir: PathBuf,
}

impl FileArtifactStore {
    /// 目录在首次写入时创建
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ArtifactStorePort for FileArtifactStore {
    fn path_for(&self, id: &ProjectId, format: ArtifactFormat) -> PathBuf {
        self.dir.join(format.file_name(id))
    }

    async fn write(
        &self,
        id: &ProjectId,
        format: ArtifactFormat,
        bytes: &[u8],
    ) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(id, format);
        let tmp = path.with_extension(format!("{}.tmp", format.extension()));
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, &path).await?;

        tracing::debug!(
            project_id = %id,
            path = %path.display(),
            size = bytes.len(),
            "Artifact written"
        );
        Ok(path)
    }

    async fn delete(&self, id: &ProjectId) -> Result<bool, StoreError> {
        let mut removed = false;
        for format in FORMATS {
            match fs::remove_file(self.path_for(id, format)).await {
                Ok(()) => removed = true,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_and_delete() {
        let dir = tempdir().unwrap();
        let store = FileArtifactStore::new(dir.path().join("artifacts"));
        let id = ProjectId::new();

        let path = store.write(&id, ArtifactFormat::Pptx, b"PK").await.unwrap();
        assert_eq!(path, store.path_for(&id, ArtifactFormat::Pptx));
        assert_eq!(std::fs::read(&path).unwrap(), b"PK");
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("presentation_"));

        assert!(store.delete(&id).await.unwrap());
        assert!(!path.exists());
        assert!(!store.delete(&id).await.unwrap());
    }
}
