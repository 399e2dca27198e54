//! Channel Generation Queue - 基于 mpsc 的待生成队列

use tokio::sync::mpsc;

use crate::application::ports::{GenerationQueuePort, QueueError};
use crate::domain::project::ProjectId;

/// 队列发送端，接收端由 GenerationWorker 持有
pub struct ChannelGenerationQueue {
    sender: mpsc::Sender<ProjectId>,
}

impl ChannelGenerationQueue {
    pub fn new(sender: mpsc::Sender<ProjectId>) -> Self {
        Self { sender }
    }

    /// 创建有界队列
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<ProjectId>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(tx), rx)
    }
}

impl GenerationQueuePort for ChannelGenerationQueue {
    fn enqueue(&self, project_id: ProjectId) -> Result<(), QueueError> {
        self.sender.try_send(project_id).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => QueueError::Full,
            mpsc::error::TrySendError::Closed(_) => QueueError::Closed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_enqueue_full_and_closed() {
        let (queue, mut rx) = ChannelGenerationQueue::bounded(1);
        let id = ProjectId::new();

        queue.enqueue(id).unwrap();
        assert!(matches!(queue.enqueue(ProjectId::new()), Err(QueueError::Full)));
        assert_eq!(rx.recv().await, Some(id));

        drop(rx);
        assert!(matches!(queue.enqueue(id), Err(QueueError::Closed)));
    }
}
