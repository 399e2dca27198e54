//! Query Handlers

mod project_handlers;
mod theme_handlers;

pub use project_handlers::{
    GetArtifactHandler, GetProjectStatusHandler, ListProjectsHandler, ProjectSummary,
};
pub use theme_handlers::{ListThemesHandler, ThemesResponse};
