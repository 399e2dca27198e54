//! Theme Registry - 主题注册表
//!
//! 启动时加载一次，之后只读；可在并发请求间共享

use std::collections::HashMap;

use super::catalog::{builtin_themes, DEFAULT_THEME_ID};
use super::value_objects::{ThemeConfig, ThemeSummary};

/// 主题注册表
///
/// 不变量:
/// - 目录中一定包含默认主题
/// - `get` 永不失败
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: &'static [ThemeConfig],
    index: HashMap<&'static str, usize>,
    default_index: usize,
}

impl ThemeRegistry {
    /// 使用内置目录构建
    pub fn builtin() -> Self {
        Self::from_catalog(builtin_themes(), DEFAULT_THEME_ID)
    }

    /// 从给定目录构建；`default_id` 不在目录中时使用第一个主题
    pub fn from_catalog(themes: &'static [ThemeConfig], default_id: &str) -> Self {
        let index: HashMap<&'static str, usize> =
            themes.iter().enumerate().map(|(i, t)| (t.id, i)).collect();
        let default_index = index.get(default_id).copied().unwrap_or(0);
        Self {
            themes,
            index,
            default_index,
        }
    }

    /// 按 key 查找主题，未知 key 返回默认主题
    pub fn get(&self, theme_id: &str) -> &ThemeConfig {
        match self.index.get(theme_id) {
            Some(&i) => &self.themes[i],
            None => {
                tracing::debug!(theme_id = %theme_id, "Unknown theme, using default");
                self.default_theme()
            }
        }
    }

    /// 是否为目录中的主题
    pub fn contains(&self, theme_id: &str) -> bool {
        self.index.contains_key(theme_id)
    }

    /// 默认主题
    pub fn default_theme(&self) -> &ThemeConfig {
        &self.themes[self.default_index]
    }

    /// 所有主题 key（目录顺序）
    pub fn ids(&self) -> Vec<&'static str> {
        self.themes.iter().map(|t| t.id).collect()
    }

    /// 展示用摘要列表
    pub fn list(&self) -> Vec<ThemeSummary> {
        self.themes.iter().map(ThemeConfig::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
