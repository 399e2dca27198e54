//! Generation Pipeline - 生成流水线
//!
//! - invoker: 带退避重试的后端调用
//! - stages: 阶段描述表
//! - sequencer: 阶段状态机，驱动整个运行

mod error;
mod invoker;
mod sequencer;
mod stages;

pub use error::PipelineError;
pub use invoker::{is_overload, Attempt, InvokeFailure, InvokeReport, ResilientInvoker, RetryPolicy};
pub use sequencer::{Sequencer, SequencerDeps};
pub use stages::{PromptBuilder, StageDescriptor, StageKind, DEFAULT_STAGES};
