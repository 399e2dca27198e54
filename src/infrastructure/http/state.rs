//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    DeleteProjectHandler, GenerationLimits, SubmitGenerationHandler,
    // Query handlers
    GetArtifactHandler, GetProjectStatusHandler, ListProjectsHandler, ListThemesHandler,
    // Ports
    ArtifactStorePort, GenerationQueuePort, ProjectStorePort,
};
use crate::domain::theme::ThemeRegistry;
use crate::infrastructure::events::EventPublisher;

/// 应用状态
pub struct AppState {
    // ========== Shared ==========
    pub themes: Arc<ThemeRegistry>,
    pub event_publisher: Arc<EventPublisher>,

    // ========== Command Handlers ==========
    pub submit_generation_handler: SubmitGenerationHandler,
    pub delete_project_handler: DeleteProjectHandler,

    // ========== Query Handlers ==========
    pub get_project_status_handler: GetProjectStatusHandler,
    pub list_projects_handler: ListProjectsHandler,
    pub list_themes_handler: ListThemesHandler,
    pub get_artifact_handler: GetArtifactHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        store: Arc<dyn ProjectStorePort>,
        artifacts: Arc<dyn ArtifactStorePort>,
        queue: Arc<dyn GenerationQueuePort>,
        themes: Arc<ThemeRegistry>,
        event_publisher: Arc<EventPublisher>,
        limits: GenerationLimits,
    ) -> Self {
        Self {
            themes: themes.clone(),
            event_publisher,

            // Command handlers
            submit_generation_handler: SubmitGenerationHandler::new(
                store.clone(),
                queue,
                themes.clone(),
                limits,
            ),
            delete_project_handler: DeleteProjectHandler::new(store.clone(), artifacts),

            // Query handlers
            get_project_status_handler: GetProjectStatusHandler::new(store.clone()),
            list_projects_handler: ListProjectsHandler::new(store.clone()),
            list_themes_handler: ListThemesHandler::new(themes),
            get_artifact_handler: GetArtifactHandler::new(store),
        }
    }
}
