//! Presentation Context - 演示文稿限界上下文
//!
//! 职责:
//! - SlideDocument / Slide 结构与不变量
//! - 模型输出规范化（去围栏、抽取 JSON、补默认值、去除强调标记）
//! - 合成兜底文档

mod document;
mod fallback;
mod markup;
mod normalizer;

pub use document::{ContentType, Slide, SlideDocument, DEFAULT_DESCRIPTION, DEFAULT_TITLE};
pub use fallback::synthetic_document;
pub use markup::{strip_list_marker, strip_markup};
pub use normalizer::{
    extract_json_span, normalize_document, normalize_text, normalize_value, strip_code_fences,
    NormalizedOutput,
};
