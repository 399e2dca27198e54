//! Stage Sequencer - 阶段状态机
//!
//! Planning → ContentCreation → Design → Rendering → Completed，任一阶段失败进入 Failed。
//!
//! 每个阶段:
//! 1. 记录进度事件并保存快照
//! 2. 用上一阶段的文档构造提示词，经 Invoker 调用后端（必要时切换备用后端）
//! 3. 规范化输出，更新最新文档
//!
//! 同一个项目在同一时刻只允许一个 Sequencer 运行（由 worker 保证）

use std::sync::Arc;

use super::error::PipelineError;
use super::invoker::{InvokeFailure, ResilientInvoker};
use super::stages::{StageDescriptor, StageKind, DEFAULT_STAGES};
use crate::application::ports::{
    BackendError, BackendFactoryPort, BackendOutput, BackendRole, DeckRendererPort,
    GenerativeBackendPort, ProgressNotifierPort, ProjectStorePort, PromptContext,
};
use crate::domain::presentation::{normalize_text, synthetic_document, NormalizedOutput, SlideDocument};
use crate::domain::project::{
    GenerationRequest, ProgressEvent, ProjectState, ProjectStatus, RenderedArtifact, Severity,
    Stage,
};
use crate::domain::theme::{ThemeConfig, ThemeRegistry};

/// Sequencer 依赖
#[derive(Clone)]
pub struct SequencerDeps {
    pub backends: Arc<dyn BackendFactoryPort>,
    pub renderer: Arc<dyn DeckRendererPort>,
    pub store: Arc<dyn ProjectStorePort>,
    pub notifier: Arc<dyn ProgressNotifierPort>,
    pub themes: Arc<ThemeRegistry>,
}

/// 单次运行的可变上下文
struct RunContext {
    backend: Arc<dyn GenerativeBackendPort>,
    /// 切换到备用后端时主后端的错误；之后任何失败都以它为准
    original: Option<BackendError>,
    document: Option<SlideDocument>,
    html: Option<String>,
}

/// Stage Sequencer
pub struct Sequencer {
    deps: SequencerDeps,
    invoker: ResilientInvoker,
    stages: &'static [StageDescriptor],
}

impl Sequencer {
    pub fn new(deps: SequencerDeps, invoker: ResilientInvoker) -> Self {
        Self {
            deps,
            invoker,
            stages: &DEFAULT_STAGES,
        }
    }

    /// 运行一个 pending 项目直到终止状态，返回最终快照
    pub async fn run(&self, mut state: ProjectState) -> ProjectState {
        let project_id = *state.id();

        if state.status() != ProjectStatus::Pending {
            tracing::warn!(
                project_id = %project_id,
                status = %state.status(),
                "Project is not pending, skipping run"
            );
            return state;
        }

        tracing::info!(
            project_id = %project_id,
            topic = %state.topic(),
            slides = state.slide_count(),
            theme = %state.theme_id(),
            "Generation started"
        );

        match self.execute(&mut state).await {
            Ok(()) => tracing::info!(project_id = %project_id, "Generation completed"),
            Err(err) => self.fail(&mut state, &err).await,
        }

        self.deps.notifier.finished(&state);
        state
    }

    async fn execute(&self, state: &mut ProjectState) -> Result<(), PipelineError> {
        let request = state.request()?;
        state.start()?;

        let theme = *self.deps.themes.get(request.theme_id());
        let primary = self
            .deps
            .backends
            .create(BackendRole::Primary)
            .map_err(PipelineError::BackendRejected)?;

        let mut run = RunContext {
            backend: primary,
            original: None,
            document: None,
            html: None,
        };

        for descriptor in self.stages {
            self.emit(state, descriptor.stage, format!("{}...", descriptor.name), Severity::Info)
                .await?;

            match descriptor.kind {
                StageKind::Generate {
                    prompt,
                    accepts_html,
                } => {
                    let context =
                        PromptContext::new(descriptor.stage, prompt(&request, run.document.as_ref()));
                    let output = self.call(state, &mut run, &context).await?;
                    self.absorb(state, &mut run, descriptor, accepts_html, &output)
                        .await?;
                }
                StageKind::Render => {
                    let artifact = self.render(state, &mut run, &request, &theme).await?;
                    let message = format!(
                        "Presentation ready: {} ({} pages)",
                        artifact.file_name(),
                        artifact.pages
                    );
                    state.complete(artifact)?;
                    self.emit(state, Stage::Completed, message, Severity::Info)
                        .await?;
                    return Ok(());
                }
            }
        }

        Err(PipelineError::Incomplete)
    }

    /// 规范化一个生成阶段的输出并并入运行上下文
    async fn absorb(
        &self,
        state: &mut ProjectState,
        run: &mut RunContext,
        descriptor: &StageDescriptor,
        accepts_html: bool,
        output: &BackendOutput,
    ) -> Result<(), PipelineError> {
        let normalized = normalize_text(output.text());
        tracing::debug!(
            project_id = %state.id(),
            stage = descriptor.stage.as_str(),
            model = output.model(),
            kind = normalized.kind(),
            "Stage output normalized"
        );

        match normalized {
            NormalizedOutput::Document(doc) => {
                state.set_document(doc.clone());
                run.document = Some(doc);
                run.html = None;
                self.deps.store.save(state).await?;
            }
            NormalizedOutput::Html(html) if accepts_html => {
                run.html = Some(html);
            }
            _ => {
                let message = format!(
                    "{} returned no usable slide structure, keeping previous content",
                    descriptor.stage.label()
                );
                self.emit(state, descriptor.stage, message, Severity::Warning)
                    .await?;
            }
        }
        Ok(())
    }

    /// 调用当前后端；主后端过载用尽时切换一次备用后端重试同一阶段
    async fn call(
        &self,
        state: &mut ProjectState,
        run: &mut RunContext,
        context: &PromptContext,
    ) -> Result<BackendOutput, PipelineError> {
        let backend = Arc::clone(&run.backend);
        let report = self.invoke(backend.as_ref(), context).await;

        match (report, run.original.clone()) {
            (Ok(output), _) => Ok(output),
            (Err(failure), Some(original)) => {
                tracing::error!(
                    project_id = %state.id(),
                    stage = context.stage.as_str(),
                    fallback_error = %failure.error(),
                    "Fallback backend failed, surfacing original error"
                );
                Err(PipelineError::BackendOverloaded(original))
            }
            (Err(InvokeFailure::Rejected(err)), None) => Err(PipelineError::BackendRejected(err)),
            (Err(InvokeFailure::Overloaded(original)), None) => {
                self.escalate(state, run, context, original).await
            }
        }
    }

    async fn escalate(
        &self,
        state: &mut ProjectState,
        run: &mut RunContext,
        context: &PromptContext,
        original: BackendError,
    ) -> Result<BackendOutput, PipelineError> {
        // 每次运行最多切换一次
        run.original = Some(original.clone());

        let fallback = match self.deps.backends.create(BackendRole::Fallback) {
            Ok(backend) => backend,
            Err(e) => {
                tracing::warn!(project_id = %state.id(), error = %e, "Fallback backend unavailable");
                return Err(PipelineError::BackendOverloaded(original));
            }
        };

        tracing::warn!(
            project_id = %state.id(),
            stage = context.stage.as_str(),
            from = run.backend.model(),
            to = fallback.model(),
            "Primary backend overloaded, switching to fallback"
        );
        let message = format!(
            "Primary model overloaded, retrying with fallback model {}",
            fallback.model()
        );
        run.backend = Arc::clone(&fallback);
        self.emit(state, context.stage, message, Severity::Warning)
            .await?;

        match self.invoke(fallback.as_ref(), context).await {
            Ok(output) => Ok(output),
            Err(failure) => {
                tracing::error!(
                    project_id = %state.id(),
                    fallback_error = %failure.error(),
                    "Fallback backend failed, surfacing original error"
                );
                Err(PipelineError::BackendOverloaded(original))
            }
        }
    }

    async fn invoke(
        &self,
        backend: &dyn GenerativeBackendPort,
        context: &PromptContext,
    ) -> Result<BackendOutput, InvokeFailure> {
        self.invoker
            .invoke(context.stage.as_str(), move || backend.generate(context))
            .await
            .result
    }

    async fn render(
        &self,
        state: &mut ProjectState,
        run: &mut RunContext,
        request: &GenerationRequest,
        theme: &ThemeConfig,
    ) -> Result<RenderedArtifact, PipelineError> {
        let id = *request.project_id();

        if let Some(html) = run.html.take() {
            return Ok(self.deps.renderer.store_html(&id, &html, theme).await?);
        }

        let document = match run.document.take() {
            Some(doc) => doc,
            None => {
                self.emit(
                    state,
                    Stage::Rendering,
                    "No stage produced a usable outline, using a generated one",
                    Severity::Warning,
                )
                .await?;
                let doc = synthetic_document(request.topic(), request.slide_count());
                state.set_document(doc.clone());
                doc
            }
        };

        Ok(self.deps.renderer.render(&id, &document, theme).await?)
    }

    /// 追加事件 → 保存快照 → 推送
    async fn emit(
        &self,
        state: &mut ProjectState,
        stage: Stage,
        message: impl Into<String>,
        severity: Severity,
    ) -> Result<(), PipelineError> {
        let event = ProgressEvent::new(stage, message, severity);
        state.record(event.clone());
        self.deps.store.save(state).await?;
        self.deps.notifier.notify(state.id(), &event);
        Ok(())
    }

    async fn fail(&self, state: &mut ProjectState, err: &PipelineError) {
        let message = err.to_string();
        tracing::error!(project_id = %state.id(), error = %message, "Generation failed");

        if let Err(e) = state.fail(message.clone()) {
            tracing::warn!(project_id = %state.id(), error = %e, "Could not mark project failed");
        }

        let event = ProgressEvent::new(Stage::Failed, message, Severity::Error);
        state.record(event.clone());
        if let Err(e) = self.deps.store.save(state).await {
            tracing::error!(project_id = %state.id(), error = %e, "Failed to persist failed state");
        }
        self.deps.notifier.notify(state.id(), &event);
    }
}
