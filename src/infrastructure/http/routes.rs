//! HTTP Routes
//!
//! API Endpoints:
//! - /                              GET     服务信息（主题、端点）
//! - /api/ping                      GET     健康检查
//! - /api/generate                  POST    提交生成任务（异步，通过 WS 推送进度）
//! - /api/themes                    GET     主题列表
//! - /api/projects                  GET     项目列表
//! - /api/projects/:id              DELETE  删除项目及产物
//! - /api/projects/:id/status       GET     项目状态快照
//! - /api/projects/:id/download     GET     下载产物
//! - /ws/projects/:id               WS      单个项目的进度事件
//! - /ws/events                     WS      全局完成/失败事件

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::index))
        .nest("/api", api_routes())
        .route("/ws/projects/:project_id", get(handlers::project_websocket_handler))
        .route("/ws/events", get(handlers::global_websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/generate", post(handlers::generate))
        .route("/themes", get(handlers::list_themes))
        .route("/projects", get(handlers::list_projects))
        .route("/projects/:project_id", delete(handlers::delete_project))
        .route("/projects/:project_id/status", get(handlers::project_status))
        .route("/projects/:project_id/download", get(handlers::download))
}
