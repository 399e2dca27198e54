//! deckgen - AI 演示文稿生成服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Theme Context: 内置主题目录与图标词表
//! - Presentation Context: 幻灯片文档、模型输出规范化、合成兜底文档
//! - Project Context: 生成项目状态机
//!
//! 应用层 (application/):
//! - Ports: 端口定义（GenerativeBackend, ProjectStore, ArtifactStore, DeckRenderer, ProgressNotifier, GenerationQueue）
//! - Pipeline: ResilientInvoker 重试、阶段表、Sequencer
//! - Commands / Queries: CQRS 处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + WebSocket
//! - Render: 16:9 PPTX 版式与打包
//! - Worker: GenerationWorker 后台生成
//! - Persistence: file / sled / memory 快照存储，文件系统产物存储
//! - Adapters: Gemini 与脚本后端
//! - Events: WebSocket 事件发布

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
