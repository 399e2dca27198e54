//! Theme Context - Value Objects

use serde::Serialize;

/// RGB 颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }

    /// OOXML `srgbClr` 使用的十六进制形式（大写，无 `#`）
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// CSS `rgb(r, g, b)` 形式
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.hex())
    }
}

/// 配色方案（8 种命名颜色）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorScheme {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub background_start: Rgb,
    pub background_end: Rgb,
    pub text_primary: Rgb,
    pub text_secondary: Rgb,
    pub text_light: Rgb,
}

/// 字体方案（标题/正文字体 + 4 种字号，单位 pt）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontScheme {
    pub title_font: &'static str,
    pub content_font: &'static str,
    pub title_size: u16,
    pub subtitle_size: u16,
    pub content_size: u16,
    pub bullet_size: u16,
}

/// 图标风格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconStyle {
    Modern,
    Classic,
    Minimal,
    Creative,
}

impl IconStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconStyle::Modern => "modern",
            IconStyle::Classic => "classic",
            IconStyle::Minimal => "minimal",
            IconStyle::Creative => "creative",
        }
    }
}

/// 版式偏好
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPreference {
    Balanced,
    TextHeavy,
    VisualFocused,
}

impl LayoutPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutPreference::Balanced => "balanced",
            LayoutPreference::TextHeavy => "text_heavy",
            LayoutPreference::VisualFocused => "visual_focused",
        }
    }
}

/// 完整主题配置
///
/// 纯数据，进程启动后不可变
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeConfig {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub color_scheme: ColorScheme,
    pub font_scheme: FontScheme,
    /// 渐变角度（度，0-359）
    pub gradient_angle: u16,
    pub icon_style: IconStyle,
    pub layout_preference: LayoutPreference,
}

impl ThemeConfig {
    /// 生成 CSS 自定义属性块（HTML 产物使用）
    pub fn css_variables(&self) -> String {
        let c = &self.color_scheme;
        let f = &self.font_scheme;
        format!(
            ":root {{\n  --color-primary: {};\n  --color-secondary: {};\n  --color-accent: {};\n  \
             --color-bg-start: {};\n  --color-bg-end: {};\n  --color-text: {};\n  \
             --color-text-secondary: {};\n  --color-text-light: {};\n  --font-heading: '{}', sans-serif;\n  \
             --font-body: '{}', sans-serif;\n  --gradient-angle: {}deg;\n}}\n",
            c.primary.css(),
            c.secondary.css(),
            c.accent.css(),
            c.background_start.css(),
            c.background_end.css(),
            c.text_primary.css(),
            c.text_secondary.css(),
            c.text_light.css(),
            f.title_font,
            f.content_font,
            self.gradient_angle,
        )
    }

    /// 展示用摘要
    pub fn summary(&self) -> ThemeSummary {
        ThemeSummary {
            id: self.id.to_string(),
            name: self.display_name.to_string(),
            description: self.description.to_string(),
            preview_colors: PreviewColors {
                primary: self.color_scheme.primary.css(),
                secondary: self.color_scheme.secondary.css(),
                accent: self.color_scheme.accent.css(),
            },
        }
    }
}

/// 主题预览色
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

/// 主题摘要（列表展示）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub preview_colors: PreviewColors,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_formats() {
        let c = Rgb::new(13, 71, 161);
        assert_eq!(c.hex(), "0D47A1");
        assert_eq!(c.css(), "rgb(13, 71, 161)");
        assert_eq!(c.to_string(), "#0D47A1");
    }
}
