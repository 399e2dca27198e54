//! Generation Worker - 后台生成任务处理
//!
//! 从队列消费项目 ID，每个项目在独立任务中运行一次 Sequencer。
//! 信号量限制并发数，RunRegistry 保证同一项目不会并发运行

use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};

use crate::application::pipeline::Sequencer;
use crate::application::ports::ProjectStorePort;
use crate::domain::project::{ProjectId, ProjectStatus};
use crate::infrastructure::memory::RunRegistry;

/// Worker 配置
#[derive(Debug, Clone)]
pub struct GenerationWorkerConfig {
    /// 最大并发生成数
    pub max_concurrent: usize,
}

impl Default for GenerationWorkerConfig {
    fn default() -> Self {
        Self { max_concurrent: 4 }
    }
}

/// 生成 Worker
pub struct GenerationWorker {
    config: GenerationWorkerConfig,
    queue_receiver: mpsc::Receiver<ProjectId>,
    store: Arc<dyn ProjectStorePort>,
    sequencer: Arc<Sequencer>,
    registry: Arc<RunRegistry>,
}

impl GenerationWorker {
    pub fn new(
        config: GenerationWorkerConfig,
        queue_receiver: mpsc::Receiver<ProjectId>,
        store: Arc<dyn ProjectStorePort>,
        sequencer: Arc<Sequencer>,
        registry: Arc<RunRegistry>,
    ) -> Self {
        Self {
            config,
            queue_receiver,
            store,
            sequencer,
            registry,
        }
    }

    /// 启动 Worker，队列关闭且所有运行结束后返回
    pub async fn run(mut self) {
        tracing::info!(
            max_concurrent = self.config.max_concurrent,
            "GenerationWorker started"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent.max(1)));
        let mut running = tokio::task::JoinSet::new();

        while let Some(project_id) = self.queue_receiver.recv().await {
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(p) => p,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to acquire semaphore permit");
                    continue;
                }
            };

            let Some(guard) = self.registry.try_acquire(project_id) else {
                tracing::warn!(project_id = %project_id, "Project already running, dropping duplicate dispatch");
                continue;
            };

            let store = self.store.clone();
            let sequencer = self.sequencer.clone();

            running.spawn(async move {
                let _permit = permit; // 持有 permit 直到运行结束
                let _guard = guard;
                Self::process(project_id, store, sequencer).await;
            });

            // 回收已结束的任务
            while running.try_join_next().is_some() {}
        }

        while running.join_next().await.is_some() {}
        tracing::info!("GenerationWorker stopped");
    }

    async fn process(
        project_id: ProjectId,
        store: Arc<dyn ProjectStorePort>,
        sequencer: Arc<Sequencer>,
    ) {
        let state = match store.load(&project_id).await {
            Ok(Some(state)) => state,
            Ok(None) => {
                tracing::warn!(project_id = %project_id, "Project deleted before it ran, skipping");
                return;
            }
            Err(e) => {
                tracing::error!(project_id = %project_id, error = %e, "Failed to load project");
                return;
            }
        };

        if state.status() != ProjectStatus::Pending {
            tracing::debug!(project_id = %project_id, status = %state.status(), "Project not pending, skipping");
            return;
        }

        let final_state = sequencer.run(state).await;
        tracing::info!(
            project_id = %project_id,
            status = %final_state.status(),
            events = final_state.events().len(),
            "Generation run finished"
        );
    }
}

/// 启动恢复：把遗留在 pending/running 的快照标记为失败
///
/// 返回被修改的项目数
pub async fn recover_interrupted(store: &dyn ProjectStorePort) -> usize {
    let states = match store.list().await {
        Ok(states) => states,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list projects for recovery");
            return 0;
        }
    };

    let mut recovered = 0;
    for mut state in states {
        if !state.mark_interrupted() {
            continue;
        }
        match store.save(&state).await {
            Ok(()) => recovered += 1,
            Err(e) => {
                tracing::error!(project_id = %state.id(), error = %e, "Failed to persist recovered project");
            }
        }
    }

    if recovered > 0 {
        tracing::warn!(recovered, "Marked interrupted projects as failed");
    }
    recovered
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::application::pipeline::{ResilientInvoker, RetryPolicy, SequencerDeps};
    use crate::domain::project::{GenerationRequest, ProjectState};
    use crate::domain::theme::ThemeRegistry;
    use crate::infrastructure::adapters::backend::{ScriptedBackend, ScriptedBackendFactory};
    use crate::infrastructure::events::EventPublisher;
    use crate::infrastructure::memory::ChannelGenerationQueue;
    use crate::infrastructure::persistence::{FileArtifactStore, InMemoryProjectStore};
    use crate::infrastructure::render::{DeckRenderEngine, RenderOptions};
    use crate::application::ports::GenerationQueuePort;

    fn pending(topic: &str) -> ProjectState {
        let req = GenerationRequest::new(ProjectId::new(), topic, 2, "sunset_warm").unwrap();
        ProjectState::new(&req)
    }

    #[tokio::test]
    async fn test_worker_runs_queued_projects() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(InMemoryProjectStore::new());
        let backend = Arc::new(ScriptedBackend::new("offline"));
        let deps = SequencerDeps {
            backends: Arc::new(ScriptedBackendFactory::new(backend)),
            renderer: Arc::new(DeckRenderEngine::new(
                Arc::new(FileArtifactStore::new(dir.path())),
                RenderOptions::default(),
            )),
            store: store.clone(),
            notifier: Arc::new(EventPublisher::new()),
            themes: Arc::new(ThemeRegistry::builtin()),
        };
        let sequencer = Arc::new(Sequencer::new(
            deps,
            ResilientInvoker::new(RetryPolicy {
                max_retries: 0,
                base_delay: Duration::from_millis(1),
                backoff: 1.0,
                max_delay: Duration::from_millis(1),
            }),
        ));

        let (queue, rx) = ChannelGenerationQueue::bounded(8);
        let worker = GenerationWorker::new(
            GenerationWorkerConfig { max_concurrent: 2 },
            rx,
            store.clone(),
            sequencer,
            RunRegistry::new().arc(),
        );

        let a = pending("Alpha");
        let b = pending("Beta");
        store.save(&a).await.unwrap();
        store.save(&b).await.unwrap();
        queue.enqueue(*a.id()).unwrap();
        queue.enqueue(*b.id()).unwrap();
        queue.enqueue(ProjectId::new()).unwrap(); // 不存在的项目被跳过
        drop(queue);

        worker.run().await;

        for id in [a.id(), b.id()] {
            let state = store.load(id).await.unwrap().unwrap();
            assert_eq!(state.status(), ProjectStatus::Completed);
            assert_eq!(state.artifact().unwrap().pages, 3);
        }
    }

    #[tokio::test]
    async fn test_recover_interrupted() {
        let store = InMemoryProjectStore::new();
        let mut running = pending("Running");
        running.start().unwrap();
        let waiting = pending("Waiting");
        let mut done = pending("Done");
        done.fail("earlier failure").unwrap();
        for s in [&running, &waiting, &done] {
            store.save(s).await.unwrap();
        }

        assert_eq!(recover_interrupted(&store).await, 2);

        let running = store.load(running.id()).await.unwrap().unwrap();
        assert_eq!(running.status(), ProjectStatus::Failed);
        assert_eq!(running.error(), Some("Interrupted by service restart"));
        let done = store.load(done.id()).await.unwrap().unwrap();
        assert_eq!(done.error(), Some("earlier failure"));
    }
}
