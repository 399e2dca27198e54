//! Rendering Engine - 演示文稿渲染
//!
//! - `layout`: 文档 + 主题 → 幻灯片模型
//! - `pptx`: 幻灯片模型 → OOXML 包
//! - `engine`: DeckRendererPort 实现（PPTX 渲染 / HTML 直存）

mod engine;
pub mod layout;
pub mod pptx;

pub use engine::DeckRenderEngine;
pub use layout::RenderOptions;
