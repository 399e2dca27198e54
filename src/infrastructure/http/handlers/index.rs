//! Index Handler - 服务信息

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::infrastructure::http::dto::{ApiResponse, EndpointInfo, ServiceInfo};
use crate::infrastructure::http::state::AppState;

const ENDPOINTS: [EndpointInfo; 9] = [
    EndpointInfo::new("GET", "/api/ping", "Health check"),
    EndpointInfo::new("POST", "/api/generate", "Start generating a presentation"),
    EndpointInfo::new("GET", "/api/themes", "List available themes"),
    EndpointInfo::new("GET", "/api/projects", "List projects"),
    EndpointInfo::new("GET", "/api/projects/:id/status", "Project status"),
    EndpointInfo::new("GET", "/api/projects/:id/download", "Download the rendered presentation"),
    EndpointInfo::new("DELETE", "/api/projects/:id", "Delete a finished project"),
    EndpointInfo::new("GET", "/ws/projects/:id", "Progress events for one project"),
    EndpointInfo::new("GET", "/ws/events", "Completion and failure events"),
];

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Json<ApiResponse<ServiceInfo>> {
    Json(ApiResponse::success(ServiceInfo {
        service: "AI Presentation Generator",
        version: env!("CARGO_PKG_VERSION"),
        themes: state.themes.ids(),
        default_theme: state.themes.default_theme().id.to_string(),
        endpoints: ENDPOINTS.into_iter().collect(),
    }))
}
