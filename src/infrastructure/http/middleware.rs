//! HTTP Middleware
//!
//! 请求耗时与错误状态日志

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use http::StatusCode;

/// 超过该耗时的成功请求记一条 warn（下载大文件除外）
const SLOW_REQUEST_MS: u128 = 2_000;

/// 请求日志中间件
///
/// 4xx 记 warn，5xx 记 error，均带耗时；WebSocket 升级（101）不记录。
/// 错误原因由 ApiError::into_response() 单独记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis();

    if status == StatusCode::SWITCHING_PROTOCOLS {
        return response;
    }

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms as u64,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms as u64,
            "HTTP client error"
        );
    } else if elapsed_ms > SLOW_REQUEST_MS && !uri.path().ends_with("/download") {
        tracing::warn!(
            method = %method,
            uri = %uri,
            elapsed_ms = elapsed_ms as u64,
            "Slow HTTP request"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request as HttpRequest, routing::get, Router};
    use tower::util::ServiceExt;

    fn create_test_router() -> Router {
        Router::new()
            .route("/api/ping", get(|| async { "pong" }))
            .route("/api/projects/x/status", get(|| async { StatusCode::NOT_FOUND }))
            .route(
                "/api/projects/x/download",
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            )
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    async fn status_of(uri: &str) -> StatusCode {
        let request = HttpRequest::builder().uri(uri).body(Body::empty()).unwrap();
        create_test_router().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_passes_through_success() {
        assert_eq!(status_of("/api/ping").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_passes_through_errors_unchanged() {
        assert_eq!(status_of("/api/projects/x/status").await, StatusCode::NOT_FOUND);
        assert_eq!(
            status_of("/api/projects/x/download").await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_unknown_route_is_client_error() {
        assert_eq!(status_of("/api/missing").await, StatusCode::NOT_FOUND);
    }
}
