//! Generation Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::SubmitGeneration;
use crate::infrastructure::http::dto::{ApiResponse, GenerateRequest, GenerateResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// POST /api/generate
///
/// 立即返回 project_id，进度通过 /ws/projects/:id 推送
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<ApiResponse<GenerateResponse>>, ApiError> {
    let result = state
        .submit_generation_handler
        .handle(SubmitGeneration {
            topic: req.prompt,
            num_slides: req.num_slides,
            theme: req.theme,
        })
        .await?;

    Ok(Json(ApiResponse::success(GenerateResponse {
        project_id: result.project_id,
        theme: result.theme_id,
        message: format!(
            "Presentation generation started ({} slides)",
            result.slide_count
        ),
    })))
}
