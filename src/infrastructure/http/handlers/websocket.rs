//! WebSocket Handlers

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::{IntoResponse, Response},
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use std::sync::Arc;

use super::parse_project_id;
use crate::application::GetProjectStatus;
use crate::domain::project::{ProjectId, ProjectStatus};
use crate::infrastructure::events::WsEvent;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 项目 WebSocket 连接处理（进度事件）
pub async fn project_websocket_handler(
    ws: WebSocketUpgrade,
    Path(project_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let project_id = parse_project_id(&project_id)?;
    Ok(ws
        .on_upgrade(move |socket| handle_project_socket(socket, project_id, state))
        .into_response())
}

/// 全局 WebSocket 连接处理（完成/失败事件）
pub async fn global_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_global_socket(socket, state))
}

async fn send_event(sender: &mut SplitSink<WebSocket, Message>, event: &WsEvent) -> bool {
    let msg = match serde_json::to_string(event) {
        Ok(json) => Message::Text(json),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize event");
            return true;
        }
    };
    match sender.send(msg).await {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, "Failed to send WebSocket message");
            false
        }
    }
}

/// 已结束项目对应的终止事件
fn terminal_event(
    project_id: ProjectId,
    status: ProjectStatus,
    topic: &str,
    pages: Option<usize>,
    error: Option<&str>,
) -> Option<WsEvent> {
    match status {
        ProjectStatus::Completed => Some(WsEvent::ProjectCompleted {
            project_id,
            topic: topic.to_string(),
            pages,
        }),
        ProjectStatus::Failed => Some(WsEvent::ProjectFailed {
            project_id,
            error: error.unwrap_or_default().to_string(),
        }),
        _ => None,
    }
}

async fn handle_project_socket(socket: WebSocket, project_id: ProjectId, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // 先订阅再读快照，避免漏掉中间事件
    let mut event_rx = state.event_publisher.subscribe_project(&project_id);

    let project = match state
        .get_project_status_handler
        .handle(GetProjectStatus { project_id })
        .await
    {
        Ok(project) => project,
        Err(e) => {
            tracing::warn!(project_id = %project_id, error = %e, "WebSocket connection rejected");
            let _ = sender.close().await;
            drop(event_rx);
            state.event_publisher.release_project(&project_id);
            return;
        }
    };

    // 已结束的项目: 补发终止事件后关闭
    if let Some(event) = terminal_event(
        project_id,
        project.status(),
        project.topic(),
        project.artifact().map(|a| a.pages),
        project.error(),
    ) {
        send_event(&mut sender, &event).await;
        let _ = sender.close().await;
        drop(event_rx);
        state.event_publisher.release_project(&project_id);
        return;
    }

    tracing::info!(project_id = %project_id, "WebSocket connected");

    // 事件转发任务，终止事件之后结束
    let forward_task = tokio::spawn(async move {
        while let Ok(event) = event_rx.recv().await {
            if !send_event(&mut sender, &event).await {
                break;
            }
            if matches!(
                event,
                WsEvent::ProjectCompleted { .. } | WsEvent::ProjectFailed { .. }
            ) {
                let _ = sender.close().await;
                break;
            }
        }
    });

    // 接收客户端消息（心跳）
    let receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    tracing::info!(project_id = %project_id, "WebSocket closed by client");
                    break;
                }
                Err(e) => {
                    tracing::debug!(project_id = %project_id, error = %e, "WebSocket error");
                    break;
                }
                _ => {}
            }
        }
    });

    // 等待任一任务完成
    tokio::select! {
        _ = forward_task => {}
        _ = receive_task => {}
    }

    // 清理
    state.event_publisher.release_project(&project_id);
    tracing::info!(project_id = %project_id, "WebSocket disconnected");
}

async fn handle_global_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // 订阅全局事件
    let mut event_rx = state.event_publisher.subscribe_global();

    tracing::info!("Global WebSocket connected");

    let forward_task = tokio::spawn(async move {
        while let Ok(event) = event_rx.recv().await {
            if !send_event(&mut sender, &event).await {
                break;
            }
        }
    });

    let receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    tracing::info!("Global WebSocket closed by client");
                    break;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Global WebSocket error");
                    break;
                }
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = forward_task => {}
        _ = receive_task => {}
    }

    tracing::info!("Global WebSocket disconnected");
}
