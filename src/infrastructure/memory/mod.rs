//! Memory Layer - In-Memory State Management
//!
//! 生成队列发送端与运行登记表

mod generation_queue;
mod run_registry;

pub use generation_queue::ChannelGenerationQueue;
pub use run_registry::{RunGuard, RunRegistry};
