//! Event Publisher Implementation
//!
//! WebSocket 事件推送实现：
//! - 按项目的进度通道（/ws/projects/:id）
//! - 全局通道，只发项目终止事件（/ws/events）

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::application::ports::ProgressNotifierPort;
use crate::domain::project::{ProgressEvent, ProjectId, ProjectState, ProjectStatus, Severity, Stage};

/// 每个通道的缓冲事件数
const CHANNEL_CAPACITY: usize = 100;

/// WebSocket 事件类型
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum WsEvent {
    /// 阶段进度
    Progress {
        project_id: ProjectId,
        stage: Stage,
        message: String,
        severity: Severity,
        timestamp: DateTime<Utc>,
    },
    /// 项目完成
    ProjectCompleted {
        project_id: ProjectId,
        topic: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pages: Option<usize>,
    },
    /// 项目失败
    ProjectFailed {
        project_id: ProjectId,
        error: String,
    },
}

/// 事件发布器
pub struct EventPublisher {
    /// project_id -> broadcast sender
    project_channels: DashMap<ProjectId, broadcast::Sender<WsEvent>>,
    /// 全局通道（ProjectCompleted/ProjectFailed）
    global_channel: broadcast::Sender<WsEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (global_tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            project_channels: DashMap::new(),
            global_channel: global_tx,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅全局事件
    pub fn subscribe_global(&self) -> broadcast::Receiver<WsEvent> {
        self.global_channel.subscribe()
    }

    /// 订阅项目进度（通道不存在时创建）
    pub fn subscribe_project(&self, project_id: &ProjectId) -> broadcast::Receiver<WsEvent> {
        self.project_channels
            .entry(*project_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// 没有订阅者的项目通道可以回收
    pub fn release_project(&self, project_id: &ProjectId) {
        self.project_channels
            .remove_if(project_id, |_, tx| tx.receiver_count() == 0);
    }

    fn publish_to_project(&self, project_id: &ProjectId, event: WsEvent) {
        if let Some(sender) = self.project_channels.get(project_id) {
            if let Err(e) = sender.send(event) {
                tracing::debug!(
                    project_id = %project_id,
                    error = %e,
                    "Failed to publish event (no receivers)"
                );
            }
        }
    }

    fn publish_global(&self, event: WsEvent) {
        if let Err(e) = self.global_channel.send(event) {
            tracing::debug!(error = %e, "Failed to publish global event (no receivers)");
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifierPort for EventPublisher {
    fn notify(&self, project_id: &ProjectId, event: &ProgressEvent) {
        self.publish_to_project(
            project_id,
            WsEvent::Progress {
                project_id: *project_id,
                stage: event.stage,
                message: event.message.clone(),
                severity: event.severity,
                timestamp: event.timestamp,
            },
        );
    }

    fn finished(&self, state: &ProjectState) {
        let event = match state.status() {
            ProjectStatus::Completed => WsEvent::ProjectCompleted {
                project_id: *state.id(),
                topic: state.topic().to_string(),
                pages: state.artifact().map(|a| a.pages),
            },
            ProjectStatus::Failed => WsEvent::ProjectFailed {
                project_id: *state.id(),
                error: state.error().unwrap_or("unknown error").to_string(),
            },
            _ => return,
        };
        self.publish_to_project(state.id(), event.clone());
        self.publish_global(event);
    }
}
