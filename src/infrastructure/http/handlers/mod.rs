//! HTTP Handlers

mod generation;
mod index;
mod ping;
mod projects;
mod themes;
mod websocket;

pub use generation::*;
pub use index::*;
pub use ping::*;
pub use projects::*;
pub use themes::*;
pub use websocket::*;

use crate::domain::project::ProjectId;
use crate::infrastructure::http::error::ApiError;

/// 路径参数 → ProjectId
fn parse_project_id(raw: &str) -> Result<ProjectId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid project id: {}", raw)))
}
