//! Progress Notifier Port - 进度事件出站通道
//!
//! 尽力投递，没有订阅者时直接丢弃

use crate::domain::project::{ProgressEvent, ProjectId, ProjectState};

pub trait ProgressNotifierPort: Send + Sync {
    /// 每次阶段变化后调用
    fn notify(&self, project_id: &ProjectId, event: &ProgressEvent);

    /// 项目进入终止状态
    fn finished(&self, state: &ProjectState);
}
