//! Project Query Handlers

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::error::ApplicationError;
use crate::application::ports::ProjectStorePort;
use crate::application::queries::{GetArtifact, GetProjectStatus, ListProjects};
use crate::domain::project::{ProjectId, ProjectState, ProjectStatus, RenderedArtifact};

// ============================================================================
// Response DTOs
// ============================================================================

/// 项目列表条目
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub topic: String,
    pub status: ProjectStatus,
    pub theme_id: String,
    pub slide_count: usize,
    pub last_message: Option<String>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&ProjectState> for ProjectSummary {
    fn from(state: &ProjectState) -> Self {
        Self {
            id: *state.id(),
            topic: state.topic().to_string(),
            status: state.status(),
            theme_id: state.theme_id().to_string(),
            slide_count: state.slide_count(),
            last_message: state.last_event().map(|e| e.message.clone()),
            error: state.error().map(str::to_string),
            created_at: state.created_at(),
            completed_at: state.completed_at(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GetProjectStatus Handler
///
/// 读到的是最近一次保存的快照，最多落后一个阶段
pub struct GetProjectStatusHandler {
    store: Arc<dyn ProjectStorePort>,
}

impl GetProjectStatusHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetProjectStatus) -> Result<ProjectState, ApplicationError> {
        self.store
            .load(&query.project_id)
            .await?
            .ok_or_else(|| ApplicationError::project_not_found(&query.project_id))
    }
}

/// ListProjects Handler
pub struct ListProjectsHandler {
    store: Arc<dyn ProjectStorePort>,
}

impl ListProjectsHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, _query: ListProjects) -> Result<Vec<ProjectSummary>, ApplicationError> {
        let states = self.store.list().await?;
        Ok(states.iter().map(ProjectSummary::from).collect())
    }
}

/// GetArtifact Handler - 仅已完成且文件仍存在的项目
pub struct GetArtifactHandler {
    store: Arc<dyn ProjectStorePort>,
}

impl GetArtifactHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetArtifact) -> Result<RenderedArtifact, ApplicationError> {
        let state = self
            .store
            .load(&query.project_id)
            .await?
            .ok_or_else(|| ApplicationError::project_not_found(&query.project_id))?;

        let artifact = match (state.status(), state.artifact()) {
            (ProjectStatus::Completed, Some(artifact)) => artifact.clone(),
            _ => return Err(ApplicationError::not_found("Presentation", query.project_id)),
        };

        if !tokio::fs::try_exists(&artifact.path).await.unwrap_or(false) {
            tracing::warn!(
                project_id = %query.project_id,
                path = %artifact.path.display(),
                "Artifact file missing on disk"
            );
            return Err(ApplicationError::not_found("Presentation file", query.project_id));
        }

        Ok(artifact)
    }
}
