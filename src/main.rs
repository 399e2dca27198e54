//! deckgen - 演示文稿生成服务
//!
//! 启动顺序: 配置 -> 日志 -> 存储 -> 中断恢复 -> 渲染/后端/Sequencer -> Worker -> HTTP

use std::sync::Arc;

use deckgen::application::ports::{ArtifactStorePort, BackendFactoryPort, ProjectStorePort};
use deckgen::application::{ResilientInvoker, Sequencer, SequencerDeps};
use deckgen::config::{load_config, print_config, AppConfig, BackendProvider, StorageBackend};
use deckgen::domain::theme::ThemeRegistry;
use deckgen::infrastructure::adapters::{
    GeminiBackendConfig, GeminiBackendFactory, ScriptedBackendFactory,
};
use deckgen::infrastructure::events::EventPublisher;
use deckgen::infrastructure::http::{AppState, HttpServer, ServerConfig};
use deckgen::infrastructure::memory::{ChannelGenerationQueue, RunRegistry};
use deckgen::infrastructure::persistence::{
    FileArtifactStore, FileProjectStore, InMemoryProjectStore, SledProjectStore,
};
use deckgen::infrastructure::render::{DeckRenderEngine, RenderOptions};
use deckgen::infrastructure::worker::{
    recover_interrupted, GenerationWorker, GenerationWorkerConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("deckgen - 演示文稿生成服务");
    print_config(&config);

    // 确保数据目录存在
    tokio::fs::create_dir_all(&config.storage.artifacts_dir).await?;
    if config.storage.backend != StorageBackend::Memory {
        tokio::fs::create_dir_all(&config.storage.state_dir).await?;
    }

    // 项目快照存储
    let store: Arc<dyn ProjectStorePort> = match config.storage.backend {
        StorageBackend::File => Arc::new(FileProjectStore::open(&config.storage.state_dir).await?),
        StorageBackend::Sled => Arc::new(SledProjectStore::open(&config.storage.state_dir)?),
        StorageBackend::Memory => Arc::new(InMemoryProjectStore::new()),
    };

    // 上次进程中断时仍在运行的项目标记为失败
    recover_interrupted(store.as_ref()).await;

    let artifacts: Arc<dyn ArtifactStorePort> =
        Arc::new(FileArtifactStore::new(&config.storage.artifacts_dir));
    let renderer = DeckRenderEngine::new(
        artifacts.clone(),
        RenderOptions {
            gradients: config.render.gradients,
        },
    )
    .arc();

    let themes = Arc::new(ThemeRegistry::builtin());
    let event_publisher = EventPublisher::new().arc();
    let backends = create_backends(&config);

    let sequencer = Arc::new(Sequencer::new(
        SequencerDeps {
            backends,
            renderer,
            store: store.clone(),
            notifier: event_publisher.clone(),
            themes: themes.clone(),
        },
        ResilientInvoker::new(config.retry.policy()),
    ));

    // 生成队列与 Worker
    let (queue, queue_rx) = ChannelGenerationQueue::bounded(config.generation.queue_capacity);
    let worker = GenerationWorker::new(
        GenerationWorkerConfig {
            max_concurrent: config.generation.max_concurrent,
        },
        queue_rx,
        store.clone(),
        sequencer,
        RunRegistry::new().arc(),
    );
    tokio::spawn(worker.run());

    // 创建 HTTP 服务器
    let state = AppState::new(
        store,
        artifacts,
        Arc::new(queue),
        themes,
        event_publisher,
        config.generation.limits(),
    );
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志（RUST_LOG 优先于配置）
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},deckgen={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn create_backends(config: &AppConfig) -> Arc<dyn BackendFactoryPort> {
    match config.backend.provider {
        BackendProvider::Gemini => {
            let base = GeminiBackendConfig {
                base_url: config.backend.base_url.clone(),
                api_key: config.backend.api_key.clone(),
                model: config.backend.model.clone(),
                timeout_secs: config.backend.timeout_secs,
                temperature: config.backend.temperature,
            };
            Arc::new(GeminiBackendFactory::new(
                base,
                config.backend.fallback_model.clone(),
            ))
        }
        BackendProvider::Offline => {
            tracing::warn!("Offline provider selected, every deck uses the synthetic outline");
            Arc::new(ScriptedBackendFactory::offline())
        }
    }
}
