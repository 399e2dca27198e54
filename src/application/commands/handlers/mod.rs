//! Command Handlers

mod project_handlers;

pub use project_handlers::{DeleteProjectHandler, GenerationLimits, SubmitGenerationHandler};
