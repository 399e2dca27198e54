//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Theme Context: 主题目录（只读）
//! - Presentation Context: 幻灯片文档与模型输出规范化
//! - Project Context: 生成项目状态机

pub mod presentation;
pub mod project;
pub mod theme;
