//! Project Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    GenerationRequest, ProjectError, ProjectId, ProjectStatus, RenderedArtifact, Severity, Stage,
};
use crate::domain::presentation::SlideDocument;

/// 重启恢复时写入的错误信息
const INTERRUPTED_MESSAGE: &str = "Interrupted by service restart";

/// 进度日志条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub stage: Stage,
    pub message: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
}

impl ProgressEvent {
    pub fn new(stage: Stage, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            stage,
            message: message.into(),
            severity,
            timestamp: Utc::now(),
        }
    }
}

/// ProjectState 聚合根
///
/// 不变量:
/// - 状态只能 pending → running → completed/failed（pending 也可直接 failed）
/// - 事件日志只追加，按时间顺序
/// - completed 时一定带有产物
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectState {
    id: ProjectId,
    topic: String,
    slide_count: usize,
    theme_id: String,
    status: ProjectStatus,
    events: Vec<ProgressEvent>,
    error: Option<String>,
    artifact: Option<RenderedArtifact>,
    document: Option<SlideDocument>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl ProjectState {
    /// 为请求创建 pending 状态
    pub fn new(request: &GenerationRequest) -> Self {
        let now = Utc::now();
        Self {
            id: *request.project_id(),
            topic: request.topic().to_string(),
            slide_count: request.slide_count(),
            theme_id: request.theme_id().to_string(),
            status: ProjectStatus::Pending,
            events: Vec::new(),
            error: None,
            artifact: None,
            document: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// 还原请求（worker 从快照启动时使用）
    pub fn request(&self) -> Result<GenerationRequest, ProjectError> {
        GenerationRequest::new(self.id, &self.topic, self.slide_count, &self.theme_id)
    }

    /// pending → running
    pub fn start(&mut self) -> Result<(), ProjectError> {
        self.transition(ProjectStatus::Running)
    }

    /// 追加进度事件
    pub fn record(&mut self, event: ProgressEvent) {
        self.updated_at = event.timestamp;
        self.events.push(event);
    }

    /// 记录当前最新文档
    pub fn set_document(&mut self, document: SlideDocument) {
        self.document = Some(document);
        self.updated_at = Utc::now();
    }

    /// running → completed
    pub fn complete(&mut self, artifact: RenderedArtifact) -> Result<(), ProjectError> {
        self.transition(ProjectStatus::Completed)?;
        self.artifact = Some(artifact);
        self.completed_at = Some(self.updated_at);
        Ok(())
    }

    /// 任一活动状态 → failed
    pub fn fail(&mut self, error: impl Into<String>) -> Result<(), ProjectError> {
        self.transition(ProjectStatus::Failed)?;
        self.error = Some(error.into());
        self.completed_at = Some(self.updated_at);
        Ok(())
    }

    /// 进程重启后，遗留的活动状态标记为失败
    ///
    /// 返回是否发生了修改
    pub fn mark_interrupted(&mut self) -> bool {
        if !self.status.is_active() {
            return false;
        }
        self.record(ProgressEvent::new(
            Stage::Failed,
            INTERRUPTED_MESSAGE,
            Severity::Error,
        ));
        // 活动状态一定可以进入 failed
        self.fail(INTERRUPTED_MESSAGE).is_ok()
    }

    fn transition(&mut self, to: ProjectStatus) -> Result<(), ProjectError> {
        let allowed = matches!(
            (self.status, to),
            (ProjectStatus::Pending, ProjectStatus::Running)
                | (ProjectStatus::Pending, ProjectStatus::Failed)
                | (ProjectStatus::Running, ProjectStatus::Completed)
                | (ProjectStatus::Running, ProjectStatus::Failed)
        );
        if !allowed {
            return Err(ProjectError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }

    // Getters
    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn theme_id(&self) -> &str {
        &self.theme_id
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn events(&self) -> &[ProgressEvent] {
        &self.events
    }

    pub fn last_event(&self) -> Option<&ProgressEvent> {
        self.events.last()
    }

    /// 已进入的阶段序列（按事件顺序去重相邻重复）
    pub fn stage_history(&self) -> Vec<Stage> {
        let mut stages: Vec<Stage> = Vec::new();
        for event in &self.events {
            if stages.last() != Some(&event.stage) {
                stages.push(event.stage);
            }
        }
        stages
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn artifact(&self) -> Option<&RenderedArtifact> {
        self.artifact.as_ref()
    }

    pub fn document(&self) -> Option<&SlideDocument> {
        self.document.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}
