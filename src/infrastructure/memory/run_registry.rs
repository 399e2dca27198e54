//! Run Registry - 同一项目同时只允许一个运行

use dashmap::DashMap;
use std::sync::Arc;

use crate::domain::project::ProjectId;

/// 运行中项目登记表
#[derive(Default)]
pub struct RunRegistry {
    active: DashMap<ProjectId, ()>,
}

impl RunRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 登记项目；已在运行时返回 None
    ///
    /// 返回的 guard 释放时自动注销
    pub fn try_acquire(self: &Arc<Self>, project_id: ProjectId) -> Option<RunGuard> {
        match self.active.entry(project_id) {
            dashmap::mapref::entry::Entry::Occupied(_) => None,
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(());
                Some(RunGuard {
                    registry: Arc::clone(self),
                    project_id,
                })
            }
        }
    }
}

/// 运行登记凭证
pub struct RunGuard {
    registry: Arc<RunRegistry>,
    project_id: ProjectId,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.registry.active.remove(&self.project_id);
    }
}
