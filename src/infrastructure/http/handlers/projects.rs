//! Project Handlers

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use super::parse_project_id;
use crate::application::{DeleteProject, GetArtifact, GetProjectStatus, ListProjects, ProjectSummary};
use crate::domain::project::ProjectState;
use crate::infrastructure::http::dto::{ApiResponse, DeleteProjectResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// GET /api/projects
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ProjectSummary>>>, ApiError> {
    let projects = state.list_projects_handler.handle(ListProjects).await?;
    Ok(Json(ApiResponse::success(projects)))
}

/// GET /api/projects/:id/status
pub async fn project_status(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
) -> Result<Json<ApiResponse<ProjectState>>, ApiError> {
    let project_id = parse_project_id(&project_id)?;
    let project = state
        .get_project_status_handler
        .handle(GetProjectStatus { project_id })
        .await?;
    Ok(Json(ApiResponse::success(project)))
}

/// DELETE /api/projects/:id
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
) -> Result<Json<ApiResponse<DeleteProjectResponse>>, ApiError> {
    let project_id = parse_project_id(&project_id)?;
    let result = state
        .delete_project_handler
        .handle(DeleteProject { project_id })
        .await?;
    state.event_publisher.release_project(&project_id);

    Ok(Json(ApiResponse::success(DeleteProjectResponse {
        project_id: result.project_id,
        artifact_removed: result.artifact_removed,
    })))
}

/// GET /api/projects/:id/download
///
/// 以流的方式返回产物文件
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
) -> Result<Response, ApiError> {
    let project_id = parse_project_id(&project_id)?;
    let artifact = state
        .get_artifact_handler
        .handle(GetArtifact { project_id })
        .await?;

    let file = tokio::fs::File::open(artifact.path())
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to open artifact: {}", e)))?;
    let body = Body::from_stream(ReaderStream::new(file));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, artifact.format.content_type())
        .header(header::CONTENT_LENGTH, artifact.size_bytes)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.file_name()),
        )
        .body(body)
        .map_err(|e| ApiError::Internal(e.to_string()))
}
