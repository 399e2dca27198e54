//! Generation Queue Port - 待生成项目队列

use thiserror::Error;

use crate::domain::project::ProjectId;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Generation queue is full")]
    Full,

    #[error("Generation worker is not running")]
    Closed,
}

/// 提交侧只负责入队，执行由 worker 负责
pub trait GenerationQueuePort: Send + Sync {
    fn enqueue(&self, project_id: ProjectId) -> Result<(), QueueError>;
}
