//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置（CORS 全开放）

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::info;

use super::middleware::error_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 构建 Router
    pub fn build_router(&self) -> Router {
        // CORS 配置 - 允许所有来源的跨域请求
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
            .expose_headers(Any)
            .max_age(std::time::Duration::from_secs(3600));

        // 请求体只有 JSON 参数，限制为 1MB
        create_routes()
            .layer(DefaultBodyLimit::max(1024 * 1024))
            .layer(middleware::from_fn(error_logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use http::{Method, Request, StatusCode};
    use serde_json::Value;
    use tokio::sync::mpsc;
    use tower::util::ServiceExt;

    use crate::application::{ArtifactStorePort, GenerationLimits, ProjectStorePort};
    use crate::domain::project::{
        ArtifactFormat, GenerationRequest, ProjectId, ProjectState, RenderedArtifact,
    };
    use crate::domain::theme::ThemeRegistry;
    use crate::infrastructure::events::EventPublisher;
    use crate::infrastructure::memory::ChannelGenerationQueue;
    use crate::infrastructure::persistence::file::FileArtifactStore;
    use crate::infrastructure::persistence::memory::InMemoryProjectStore;

    struct TestApp {
        router: Router,
        store: Arc<InMemoryProjectStore>,
        artifacts: Arc<FileArtifactStore>,
        queue_rx: mpsc::Receiver<ProjectId>,
        _dir: tempfile::TempDir,
    }

    fn app() -> TestApp {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(InMemoryProjectStore::new());
        let artifacts = Arc::new(FileArtifactStore::new(dir.path()));
        let (queue, queue_rx) = ChannelGenerationQueue::bounded(8);
        let state = AppState::new(
            store.clone(),
            artifacts.clone(),
            Arc::new(queue),
            Arc::new(ThemeRegistry::builtin()),
            EventPublisher::new().arc(),
            GenerationLimits::default(),
        );
        let router = HttpServer::new(ServerConfig::default(), state).build_router();
        TestApp {
            router,
            store,
            artifacts,
            queue_rx,
            _dir: dir,
        }
    }

    async fn call(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_ping_and_index() {
        let t = app();

        let (status, body) = call(&t.router, Method::GET, "/api/ping", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = call(&t.router, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["default_theme"], "corporate_blue");
        assert_eq!(body["data"]["themes"].as_array().unwrap().len(), 15);
    }

    #[tokio::test]
    async fn test_generate_enqueues_pending_project() {
        let mut t = app();

        let (status, body) = call(
            &t.router,
            Method::POST,
            "/api/generate",
            Some(serde_json::json!({"prompt": "Quarterly Results", "num_slides": 3, "theme": "ocean_depths"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["theme"], "ocean_depths");

        let id: ProjectId = body["data"]["project_id"].as_str().unwrap().parse().unwrap();
        assert_eq!(t.queue_rx.try_recv().unwrap(), id);
        let stored = t.store.load(&id).await.unwrap().unwrap();
        assert_eq!(stored.slide_count(), 3);

        let (status, body) = call(&t.router, Method::GET, &format!("/api/projects/{id}/status"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "pending");
    }

    #[tokio::test]
    async fn test_generate_validation_errors() {
        let t = app();

        let (status, body) = call(
            &t.router,
            Method::POST,
            "/api/generate",
            Some(serde_json::json!({"prompt": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errno"], 400);
        assert_eq!(body["error"], "Prompt is required");

        let (status, _) = call(
            &t.router,
            Method::POST,
            "/api/generate",
            Some(serde_json::json!({"prompt": "x", "num_slides": 21})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(
            &t.router,
            Method::POST,
            "/api/generate",
            Some(serde_json::json!({"prompt": "x", "theme": "neon"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("corporate_blue"));
    }

    #[tokio::test]
    async fn test_themes_endpoint() {
        let t = app();
        let (status, body) = call(&t.router, Method::GET, "/api/themes", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 15);
        assert_eq!(body["data"]["default_theme"], "corporate_blue");
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_project_ids() {
        let t = app();

        let (status, body) = call(
            &t.router,
            Method::GET,
            &format!("/api/projects/{}/status", ProjectId::new()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errno"], 404);

        let (status, _) = call(&t.router, Method::GET, "/api/projects/nope/status", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_download_and_delete_lifecycle() {
        let t = app();
        let id = ProjectId::new();
        let mut state = ProjectState::new(&GenerationRequest::new(id, "Topic", 1, "corporate_blue").unwrap());
        t.store.save(&state).await.unwrap();

        // 未完成: 不能下载，也不能删除
        let (status, _) = call(&t.router, Method::GET, &format!("/api/projects/{id}/download"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, body) = call(&t.router, Method::DELETE, &format!("/api/projects/{id}"), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["errno"], 409);

        let bytes = b"fake pptx bytes".to_vec();
        let path = t.artifacts.write(&id, ArtifactFormat::Pptx, &bytes).await.unwrap();
        state.start().unwrap();
        state
            .complete(RenderedArtifact {
                path,
                format: ArtifactFormat::Pptx,
                pages: 2,
                size_bytes: bytes.len() as u64,
                md5: format!("{:x}", md5::compute(&bytes)),
            })
            .unwrap();
        t.store.save(&state).await.unwrap();

        let response = t
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/projects/{id}/download"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            ArtifactFormat::Pptx.content_type()
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body.as_ref(), bytes.as_slice());

        let (status, body) = call(&t.router, Method::DELETE, &format!("/api/projects/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["artifact_removed"], true);
        assert!(t.store.load(&id).await.unwrap().is_none());

        let (status, _) = call(&t.router, Method::GET, &format!("/api/projects/{id}/download"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
