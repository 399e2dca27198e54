//! Project Command Handlers

use std::sync::Arc;

use crate::application::commands::{
    DeleteProject, DeleteProjectResponse, SubmitGeneration, SubmitGenerationResponse,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{ArtifactStorePort, GenerationQueuePort, ProjectStorePort};
use crate::domain::project::{GenerationRequest, ProjectId, ProjectState};
use crate::domain::theme::ThemeRegistry;

/// 请求校验参数
#[derive(Debug, Clone)]
pub struct GenerationLimits {
    pub default_slides: usize,
    pub max_slides: usize,
    pub default_theme: String,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            default_slides: 5,
            max_slides: 20,
            default_theme: crate::domain::theme::DEFAULT_THEME_ID.to_string(),
        }
    }
}

/// SubmitGeneration Handler - 校验请求，保存 pending 快照并入队
pub struct SubmitGenerationHandler {
    store: Arc<dyn ProjectStorePort>,
    queue: Arc<dyn GenerationQueuePort>,
    themes: Arc<ThemeRegistry>,
    limits: GenerationLimits,
}

impl SubmitGenerationHandler {
    pub fn new(
        store: Arc<dyn ProjectStorePort>,
        queue: Arc<dyn GenerationQueuePort>,
        themes: Arc<ThemeRegistry>,
        limits: GenerationLimits,
    ) -> Self {
        Self {
            store,
            queue,
            themes,
            limits,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitGeneration,
    ) -> Result<SubmitGenerationResponse, ApplicationError> {
        let topic = cmd.topic.trim();
        if topic.is_empty() {
            return Err(ApplicationError::validation("Prompt is required"));
        }

        let slide_count = cmd.num_slides.unwrap_or(self.limits.default_slides);
        if slide_count == 0 || slide_count > self.limits.max_slides {
            return Err(ApplicationError::validation(format!(
                "Number of slides must be between 1 and {}",
                self.limits.max_slides
            )));
        }

        let theme_id = match cmd.theme.as_deref().map(str::trim) {
            None | Some("") => self.limits.default_theme.clone(),
            Some(id) if self.themes.contains(id) => id.to_string(),
            Some(id) => {
                return Err(ApplicationError::validation(format!(
                    "Invalid theme '{}'. Available themes: {}",
                    id,
                    self.themes.ids().join(", ")
                )));
            }
        };

        let request = GenerationRequest::new(ProjectId::new(), topic, slide_count, &theme_id)?;
        let mut state = ProjectState::new(&request);
        self.store.save(&state).await?;

        if let Err(e) = self.queue.enqueue(*request.project_id()) {
            tracing::error!(project_id = %request.project_id(), error = %e, "Failed to enqueue generation");
            state.fail(e.to_string())?;
            self.store.save(&state).await?;
            return Err(ApplicationError::Unavailable(e.to_string()));
        }

        tracing::info!(
            project_id = %request.project_id(),
            slides = slide_count,
            theme = %theme_id,
            "Generation submitted"
        );

        Ok(SubmitGenerationResponse {
            project_id: *request.project_id(),
            theme_id,
            slide_count,
        })
    }
}

/// DeleteProject Handler - 删除快照和产物；运行中的项目不可删除
pub struct DeleteProjectHandler {
    store: Arc<dyn ProjectStorePort>,
    artifacts: Arc<dyn ArtifactStorePort>,
}

impl DeleteProjectHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>, artifacts: Arc<dyn ArtifactStorePort>) -> Self {
        Self { store, artifacts }
    }

    pub async fn handle(&self, cmd: DeleteProject) -> Result<DeleteProjectResponse, ApplicationError> {
        let state = self
            .store
            .load(&cmd.project_id)
            .await?
            .ok_or_else(|| ApplicationError::project_not_found(&cmd.project_id))?;

        if state.status().is_active() {
            return Err(ApplicationError::invalid_state(format!(
                "Project {} is still {}",
                cmd.project_id,
                state.status()
            )));
        }

        let artifact_removed = self.artifacts.delete(&cmd.project_id).await?;
        self.store.delete(&cmd.project_id).await?;

        tracing::info!(project_id = %cmd.project_id, artifact_removed, "Project deleted");

        Ok(DeleteProjectResponse {
            project_id: cmd.project_id,
            artifact_removed,
        })
    }
}
