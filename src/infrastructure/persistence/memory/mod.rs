//! In-Memory Persistence - 进程内快照存储（测试与临时部署用）

use async_trait::async_trait;
use dashmap::DashMap;

use crate::application::ports::{ProjectStorePort, StoreError};
use crate::domain::project::{ProjectId, ProjectState};

/// 内存快照存储，重启后丢失
#[derive(Default)]
pub struct InMemoryProjectStore {
    states: DashMap<ProjectId, ProjectState>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectStorePort for InMemoryProjectStore {
    async fn load(&self, id: &ProjectId) -> Result<Option<ProjectState>, StoreError> {
        Ok(self.states.get(id).map(|s| s.clone()))
    }

    async fn save(&self, state: &ProjectState) -> Result<(), StoreError> {
        self.states.insert(*state.id(), state.clone());
        Ok(())
    }

    async fn delete(&self, id: &ProjectId) -> Result<bool, StoreError> {
        Ok(self.states.remove(id).is_some())
    }

    async fn list(&self) -> Result<Vec<ProjectState>, StoreError> {
        let mut states: Vec<ProjectState> = self.states.iter().map(|e| e.value().clone()).collect();
        states.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(states)
    }
}
