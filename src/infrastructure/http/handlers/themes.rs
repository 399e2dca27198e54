//! Theme Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{ListThemes, ThemesResponse};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::state::AppState;

/// GET /api/themes
pub async fn list_themes(State(state): State<Arc<AppState>>) -> Json<ApiResponse<ThemesResponse>> {
    Json(ApiResponse::success(
        state.list_themes_handler.handle(ListThemes),
    ))
}
