//! Theme Query Handlers

use serde::Serialize;
use std::sync::Arc;

use crate::application::queries::ListThemes;
use crate::domain::theme::{ThemeRegistry, ThemeSummary};

/// 主题列表响应
#[derive(Debug, Clone, Serialize)]
pub struct ThemesResponse {
    pub themes: Vec<ThemeSummary>,
    pub default_theme: String,
    pub total: usize,
}

/// ListThemes Handler
pub struct ListThemesHandler {
    themes: Arc<ThemeRegistry>,
}

impl ListThemesHandler {
    pub fn new(themes: Arc<ThemeRegistry>) -> Self {
        Self { themes }
    }

    pub fn handle(&self, _query: ListThemes) -> ThemesResponse {
        let themes = self.themes.list();
        ThemesResponse {
            total: themes.len(),
            themes,
            default_theme: self.themes.default_theme().id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_themes() {
        let handler = ListThemesHandler::new(Arc::new(ThemeRegistry::builtin()));
        let resp = handler.handle(ListThemes);
        assert_eq!(resp.total, 15);
        assert_eq!(resp.default_theme, "corporate_blue");
        assert_eq!(resp.themes[0].id, "corporate_blue");
    }
}
