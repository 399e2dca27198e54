//! Theme Context - 主题限界上下文
//!
//! 职责:
//! - 不可变的主题目录（配色、字体、渐变角度、图标风格、版式偏好）
//! - 按 key 查找主题，未知 key 回落到默认主题
//! - 图标词表（要点前缀字形）

mod catalog;
mod icons;
mod registry;
mod value_objects;

pub use catalog::{builtin_themes, DEFAULT_THEME_ID};
pub use icons::{glyph_for, PLAIN_BULLET};
pub use registry::ThemeRegistry;
pub use value_objects::{
    ColorScheme, FontScheme, IconStyle, LayoutPreference, PreviewColors, Rgb, ThemeConfig,
    ThemeSummary,
};
