//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod artifact_store;
mod deck_renderer;
mod generation_queue;
mod generative_backend;
mod progress_notifier;
mod project_store;

pub use artifact_store::ArtifactStorePort;
pub use deck_renderer::{DeckRendererPort, RenderError};
pub use generation_queue::{GenerationQueuePort, QueueError};
pub use generative_backend::{
    BackendError, BackendFactoryPort, BackendOutput, BackendRole, GenerativeBackendPort,
    PromptContext,
};
pub use progress_notifier::ProgressNotifierPort;
pub use project_store::{ProjectStorePort, StoreError};
