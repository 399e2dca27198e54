//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::domain::project::ProjectId;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Generation DTOs
// ============================================================================

/// POST /api/generate 请求体
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
    pub num_slides: Option<usize>,
    pub theme: Option<String>,
}

/// POST /api/generate 响应
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub project_id: ProjectId,
    pub theme: String,
    pub message: String,
}

/// DELETE /api/projects/:id 响应
#[derive(Debug, Serialize)]
pub struct DeleteProjectResponse {
    pub project_id: ProjectId,
    pub artifact_removed: bool,
}

// ============================================================================
// Service banner
// ============================================================================

/// GET / 响应
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub themes: Vec<&'static str>,
    pub default_theme: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

impl EndpointInfo {
    pub const fn new(method: &'static str, path: &'static str, description: &'static str) -> Self {
        Self {
            method,
            path,
            description,
        }
    }
}
