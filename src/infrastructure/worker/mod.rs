//! Worker Layer - Background Task Processing
//!
//! 实现 GenerationWorker，处理排队的生成项目

mod generation_worker;

pub use generation_worker::{recover_interrupted, GenerationWorker, GenerationWorkerConfig};
