//! Project Context - 生成项目限界上下文
//!
//! 职责:
//! - GenerationRequest（不可变请求）
//! - ProjectState 聚合（状态机 + 进度日志）
//! - 产物描述 RenderedArtifact

mod aggregate;
mod errors;
mod request;
mod value_objects;

pub use aggregate::{ProgressEvent, ProjectState};
pub use errors::ProjectError;
pub use request::GenerationRequest;
pub use value_objects::{ArtifactFormat, ProjectId, ProjectStatus, RenderedArtifact, Severity, Stage};
