//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（后端、存储、渲染、进度通知、队列）
//! - pipeline: 生成流水线（Invoker、阶段表、Sequencer）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{DeleteProjectHandler, GenerationLimits, SubmitGenerationHandler},
    DeleteProject, DeleteProjectResponse, SubmitGeneration, SubmitGenerationResponse,
};

pub use error::ApplicationError;

pub use pipeline::{PipelineError, ResilientInvoker, RetryPolicy, Sequencer, SequencerDeps};

pub use ports::{
    ArtifactStorePort, BackendError, BackendFactoryPort, BackendOutput, BackendRole,
    DeckRendererPort, GenerationQueuePort, GenerativeBackendPort, ProgressNotifierPort,
    ProjectStorePort, PromptContext, QueueError, RenderError, StoreError,
};

pub use queries::{
    handlers::{
        GetArtifactHandler, GetProjectStatusHandler, ListProjectsHandler, ListThemesHandler,
        ProjectSummary, ThemesResponse,
    },
    GetArtifact, GetProjectStatus, ListProjects, ListThemes,
};
