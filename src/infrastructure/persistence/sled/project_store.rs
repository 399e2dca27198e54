//! Sled-based Project Store
//!
//! Key: `project:{id}`，Value: bincode 编码的 ProjectState

use async_trait::async_trait;
use sled::Db;
use std::path::Path;

use crate::application::ports::{ProjectStorePort, StoreError};
use crate::domain::project::{ProjectId, ProjectState};

const KEY_PREFIX: &str = "project:";

/// Sled 快照存储
pub struct SledProjectStore {
    db: Db,
}

impl SledProjectStore {
    /// 打开（或创建）数据库
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path.as_ref()).map_err(|e| StoreError::Database(e.to_string()))?;
        tracing::info!(
            db_path = %path.as_ref().display(),
            projects = db.scan_prefix(KEY_PREFIX).count(),
            "SledProjectStore initialized"
        );
        Ok(Self { db })
    }

    fn key(id: &ProjectId) -> String {
        format!("{}{}", KEY_PREFIX, id)
    }

    fn decode(bytes: &[u8]) -> Result<ProjectState, StoreError> {
        bincode::deserialize(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl ProjectStorePort for SledProjectStore {
    async fn load(&self, id: &ProjectId) -> Result<Option<ProjectState>, StoreError> {
        let value = self
            .db
            .get(Self::key(id))
            .map_err(|e| StoreError::Database(e.to_string()))?;
        value.map(|v| Self::decode(&v)).transpose()
    }

    async fn save(&self, state: &ProjectState) -> Result<(), StoreError> {
        let bytes =
            bincode::serialize(state).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.db
            .insert(Self::key(state.id()), bytes)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        self.db
            .flush_async()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }

    async fn delete(&self, id: &ProjectId) -> Result<bool, StoreError> {
        let removed = self
            .db
            .remove(Self::key(id))
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(removed.is_some())
    }

    async fn list(&self) -> Result<Vec<ProjectState>, StoreError> {
        let mut states = Vec::new();
        for item in self.db.scan_prefix(KEY_PREFIX) {
            let (key, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            match Self::decode(&value) {
                Ok(state) => states.push(state),
                Err(e) => {
                    tracing::warn!(key = %String::from_utf8_lossy(&key), error = %e, "Skipping undecodable snapshot");
                }
            }
        }
        states.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(states)
    }
}
