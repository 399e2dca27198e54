//! Theme Context - 内置主题目录
//!
//! 15 套内置主题，顺序即展示顺序

use super::value_objects::{ColorScheme, FontScheme, IconStyle, LayoutPreference, Rgb, ThemeConfig};

/// 默认主题 key（未知 key 回落到此主题）
pub const DEFAULT_THEME_ID: &str = "corporate_blue";

static BUILTIN_THEMES: [ThemeConfig; 15] = [
    ThemeConfig {
        id: "corporate_blue",
        display_name: "Corporate Blue",
        description: "Professional and trustworthy with classic blue tones",
        color_scheme: ColorScheme {
            primary: Rgb::new(13, 71, 161),
            secondary: Rgb::new(66, 165, 245),
            accent: Rgb::new(255, 193, 7),
            background_start: Rgb::new(240, 248, 255),
            background_end: Rgb::new(227, 242, 253),
            text_primary: Rgb::new(33, 37, 41),
            text_secondary: Rgb::new(108, 117, 125),
            text_light: Rgb::new(255, 255, 255),
        },
        font_scheme: FontScheme {
            title_font: "Segoe UI Semibold",
            content_font: "Segoe UI",
            title_size: 36,
            subtitle_size: 28,
            content_size: 20,
            bullet_size: 18,
        },
        gradient_angle: 135,
        icon_style: IconStyle::Classic,
        layout_preference: LayoutPreference::Balanced,
    },
    ThemeConfig {
        id: "modern_gradient",
        display_name: "Modern Gradient",
        description: "Contemporary design with smooth gradients and modern typography",
        color_scheme: ColorScheme {
            primary: Rgb::new(102, 51, 153),
            secondary: Rgb::new(156, 39, 176),
            accent: Rgb::new(255, 87, 34),
            background_start: Rgb::new(248, 245, 255),
            background_end: Rgb::new(240, 230, 255),
            text_primary: Rgb::new(33, 33, 33),
            text_secondary: Rgb::new(97, 97, 97),
            text_light: Rgb::new(255, 255, 255),
        },
        font_scheme: FontScheme {
            title_font: "Segoe UI Light",
            content_font: "Segoe UI",
            title_size: 40,
            subtitle_size: 26,
            content_size: 19,
            bullet_size: 17,
        },
        gradient_angle: 45,
        icon_style: IconStyle::Modern,
        layout_preference: LayoutPreference::VisualFocused,
    },
    ThemeConfig {
        id: "elegant_dark",
        display_name: "Elegant Dark",
        description: "Sophisticated dark theme with gold accents for premium feel",
        color_scheme: ColorScheme {
            primary: Rgb::new(33, 37, 41),
            secondary: Rgb::new(52, 58, 64),
            accent: Rgb::new(255, 193, 7),
            background_start: Rgb::new(52, 58, 64),
            background_end: Rgb::new(33, 37, 41),
            text_primary: Rgb::new(248, 249, 250),
            text_secondary: Rgb::new(206, 212, 218),
            text_light: Rgb::new(255, 255, 255),
        },
        font_scheme: FontScheme {
            title_font: "Segoe UI",
            content_font: "Segoe UI",
            title_size: 38,
            subtitle_size: 26,
            content_size: 20,
            bullet_size: 18,
        },
        gradient_angle: 90,
        icon_style: IconStyle::Minimal,
        layout_preference: LayoutPreference::TextHeavy,
    },
    ThemeConfig {
        id: "nature_green",
        display_name: "Nature Green",
        description: "Fresh and natural with green tones, perfect for environmental topics",
        color_scheme: ColorScheme {
            primary: Rgb::new(46, 125, 50),
            secondary: Rgb::new(102, 187, 106),
            accent: Rgb::new(255, 167, 38),
            background_start: Rgb::new(248, 255, 248),
            background_end: Rgb::new(232, 245, 233),
            text_primary: Rgb::new(27, 94, 32),
            text_secondary: Rgb::new(76, 175, 80),
            text_light: Rgb::new(255, 255, 255),
        },
        font_scheme: FontScheme {
            title_font: "Segoe UI Semibold",
            content_font: "Segoe UI",
            title_size: 36,
            subtitle_size: 28,
            content_size: 20,
            bullet_size: 18,
        },
        gradient_angle: 120,
        icon_style: IconStyle::Creative,
        layout_preference: LayoutPreference::Balanced,
    },
    ThemeConfig {
        id: "sunset_warm",
        display_name: "Sunset Warm",
        description: "Energetic warm tones inspired by sunset colors",
        color_scheme: ColorScheme {
            primary: Rgb::new(230, 81, 0),
            secondary: Rgb::new(255, 138, 101),
            accent: Rgb::new(244, 67, 54),
            background_start: Rgb::new(255, 248, 225),
            background_end: Rgb::new(255, 236, 179),
            text_primary: Rgb::new(191, 54, 12),
            text_secondary: Rgb::new(239, 108, 0),
            text_light: Rgb::new(255, 255, 255),
        },
        font_scheme: FontScheme {
            title_font: "Segoe UI",
            content_font: "Segoe UI",
            title_size: 38,
            subtitle_size: 28,
            content_size: 20,
            bullet_size: 18,
        },
        gradient_angle: 60,
        icon_style: IconStyle::Modern,
        layout_preference: LayoutPreference::VisualFocused,
    },
    ThemeConfig {
        id: "ocean_depths",
        display_name: "Ocean Depths",
        description: "Deep and calming ocean-inspired blues and teals",
        color_scheme: ColorScheme {
            primary: Rgb::new(0, 77, 64),
            secondary: Rgb::new(0, 150, 136),
            accent: Rgb::new(255, 235, 59),
            background_start: Rgb::new(224, 247, 250),
            background_end: Rgb::new(178, 235, 242),
            text_primary: Rgb::new(0, 77, 64),
            text_secondary: Rgb::new(0, 121, 107),
            text_light: Rgb::new(255, 255, 255),
        },
        font_scheme: FontScheme {
            title_font: "Segoe UI Light",
            content_font: "Segoe UI",
            title_size: 36,
            subtitle_size: 26,
            content_size: 19,
            bullet_size: 17,
        },
        gradient_angle: 180,
        icon_style: IconStyle::Modern,
        layout_preference: LayoutPreference::Balanced,
    },
    ThemeConfig {
        id: "royal_purple",
        display_name: "Royal Purple",
        description: "Luxurious and regal with deep purple and gold combinations",
        color_scheme: ColorScheme {
            primary: Rgb::new(74, 20, 140),
            secondary: Rgb::new(142, 36, 170),
            accent: Rgb::new(255, 193, 7),
            background_start: Rgb::new(250, 245, 255),
            background_end: Rgb::new(243, 229, 245),
            text_primary: Rgb::new(74, 20, 140),
            text_secondary: Rgb::new(123, 31, 162),
            text_light: Rgb::new(255, 255, 255),
        },
        font_scheme: FontScheme {
            title_font: "Segoe UI Semibold",
            content_font: "Segoe UI",
            title_size: 38,
            subtitle_size: 28,
            content_size: 20,
            bullet_size: 18,
        },
        gradient_angle: 45,
        icon_style: IconStyle::Classic,
        layout_preference: LayoutPreference::TextHeavy,
    },
    ThemeConfig {
        id: "minimalist_gray",
        display_name: "Minimalist Gray",
        description: "Clean and simple design with subtle gray tones",
        color_scheme: ColorScheme {
            primary: Rgb::new(97, 97, 97),
            secondary: Rgb::new(158, 158, 158),
            accent: Rgb::new(33, 150, 243),
            background_start: Rgb::new(255, 255, 255),
            background_end: Rgb::new(250, 250, 250),
            text_primary: Rgb::new(33, 33, 33),
            text_secondary: Rgb::new(97, 97, 97),
            text_light: Rgb::new(255, 255, 255),
        },
        font_scheme: FontScheme {
            title_font: "Segoe UI Light",
            content_font: "Segoe UI",
            title_size: 36,
            subtitle_size: 24,
            content_size: 18,
            bullet_size: 16,
        },
        gradient_angle: 0,
        icon_style: IconStyle::Minimal,
        layout_preference: LayoutPreference::TextHeavy,
    },
    ThemeConfig {
        id: "vibrant_orange",
        display_name: "Vibrant Orange",
        description: "Bold and energetic with vibrant orange and complementary colors",
        color_scheme: ColorScheme {
            primary: Rgb::new(230, 81, 0),
            secondary: Rgb::new(255, 138, 101),
            accent: Rgb::new(96, 125, 139),
            background_start: Rgb::new(255, 243, 224),
            background_end: Rgb::new(255, 224, 178),
            text_primary: Rgb::new(191, 54, 12),
            text_secondary: Rgb::new(239, 108, 0),
            text_light: Rgb::new(255, 255, 255),
        },
        font_scheme: FontScheme {
            title_font: "Segoe UI",
            content_font: "Segoe UI",
            title_size: 40,
            subtitle_size: 30,
            content_size: 22,
            bullet_size: 20,
        },
        gradient_angle: 45,
        icon_style: IconStyle::Modern,
        layout_preference: LayoutPreference::VisualFocused,
    },
    ThemeConfig {
        id: "tech_cyber",
        display_name: "Tech Cyber",
        description: "Futuristic tech theme with neon accents and dark backgrounds",
        color_scheme: ColorScheme {
            primary: Rgb::new(0, 188, 212),
            secondary: Rgb::new(0, 150, 136),
            accent: Rgb::new(76, 175, 80),
            background_start: Rgb::new(23, 28, 36),
            background_end: Rgb::new(38, 50, 64),
            text_primary: Rgb::new(224, 247, 250),
            text_secondary: Rgb::new(178, 235, 242),
            text_light: Rgb::new(255, 255, 255),
        },
        font_scheme: FontScheme {
            title_font: "Segoe UI",
            content_font: "Segoe UI",
            title_size: 38,
            subtitle_size: 26,
            content_size: 20,
            bullet_size: 18,
        },
        gradient_angle: 135,
        icon_style: IconStyle::Modern,
        layout_preference: LayoutPreference::VisualFocused,
    },
    ThemeConfig {
        id: "classic_academic",
        display_name: "Classic Academic",
        description: "Traditional academic style with serif fonts and conservative colors",
        color_scheme: ColorScheme {
            primary: Rgb::new(139, 69, 19),
            secondary: Rgb::new(205, 133, 63),
            accent: Rgb::new(178, 34, 34),
            background_start: Rgb::new(255, 248, 220),
            background_end: Rgb::new(250, 240, 210),
            text_primary: Rgb::new(101, 67, 33),
            text_secondary: Rgb::new(139, 69, 19),
            text_light: Rgb::new(255, 255, 255),
        },
        font_scheme: FontScheme {
            title_font: "Times New Roman",
            content_font: "Times New Roman",
            title_size: 36,
            subtitle_size: 26,
            content_size: 20,
            bullet_size: 18,
        },
        gradient_angle: 90,
        icon_style: IconStyle::Classic,
        layout_preference: LayoutPreference::TextHeavy,
    },
    ThemeConfig {
        id: "creative_rainbow",
        display_name: "Creative Rainbow",
        description: "Colorful and creative with rainbow gradients for artistic presentations",
        color_scheme: ColorScheme {
            primary: Rgb::new(156, 39, 176),
            secondary: Rgb::new(103, 58, 183),
            accent: Rgb::new(255, 193, 7),
            background_start: Rgb::new(255, 240, 245),
            background_end: Rgb::new(240, 230, 255),
            text_primary: Rgb::new(74, 20, 140),
            text_secondary: Rgb::new(123, 31, 162),
            text_light: Rgb::new(255, 255, 255),
        },
        font_scheme: FontScheme {
            title_font: "Segoe UI",
            content_font: "Segoe UI",
            title_size: 38,
            subtitle_size: 28,
            content_size: 20,
            bullet_size: 18,
        },
        gradient_angle: 60,
        icon_style: IconStyle::Creative,
        layout_preference: LayoutPreference::VisualFocused,
    },
    ThemeConfig {
        id: "financial_gold",
        display_name: "Financial Gold",
        description: "Professional financial theme with gold and dark blue for business presentations",
        color_scheme: ColorScheme {
            primary: Rgb::new(13, 71, 161),
            secondary: Rgb::new(25, 118, 210),
            accent: Rgb::new(255, 193, 7),
            background_start: Rgb::new(250, 250, 250),
            background_end: Rgb::new(245, 245, 245),
            text_primary: Rgb::new(13, 71, 161),
            text_secondary: Rgb::new(25, 118, 210),
            text_light: Rgb::new(255, 255, 255),
        },
        font_scheme: FontScheme {
            title_font: "Segoe UI Semibold",
            content_font: "Segoe UI",
            title_size: 36,
            subtitle_size: 26,
            content_size: 20,
            bullet_size: 18,
        },
        gradient_angle: 135,
        icon_style: IconStyle::Classic,
        layout_preference: LayoutPreference::Balanced,
    },
    ThemeConfig {
        id: "healthcare_mint",
        display_name: "Healthcare Mint",
        description: "Clean and trustworthy healthcare theme with mint green and blue tones",
        color_scheme: ColorScheme {
            primary: Rgb::new(0, 121, 107),
            secondary: Rgb::new(77, 182, 172),
            accent: Rgb::new(33, 150, 243),
            background_start: Rgb::new(240, 253, 250),
            background_end: Rgb::new(224, 247, 250),
            text_primary: Rgb::new(0, 77, 64),
            text_secondary: Rgb::new(0, 121, 107),
            text_light: Rgb::new(255, 255, 255),
        },
        font_scheme: FontScheme {
            title_font: "Segoe UI",
            content_font: "Segoe UI",
            title_size: 36,
            subtitle_size: 26,
            content_size: 20,
            bullet_size: 18,
        },
        gradient_angle: 120,
        icon_style: IconStyle::Modern,
        layout_preference: LayoutPreference::Balanced,
    },
    ThemeConfig {
        id: "startup_energy",
        display_name: "Startup Energy",
        description: "Dynamic and energetic theme perfect for startup pitches and innovation",
        color_scheme: ColorScheme {
            primary: Rgb::new(244, 67, 54),
            secondary: Rgb::new(255, 87, 34),
            accent: Rgb::new(255, 193, 7),
            background_start: Rgb::new(255, 245, 238),
            background_end: Rgb::new(255, 224, 178),
            text_primary: Rgb::new(183, 28, 28),
            text_secondary: Rgb::new(244, 67, 54),
            text_light: Rgb::new(255, 255, 255),
        },
        font_scheme: FontScheme {
            title_font: "Segoe UI",
            content_font: "Segoe UI",
            title_size: 40,
            subtitle_size: 30,
            content_size: 22,
            bullet_size: 20,
        },
        gradient_angle: 45,
        icon_style: IconStyle::Modern,
        layout_preference: LayoutPreference::VisualFocused,
    },
];

/// 内置主题列表
pub fn builtin_themes() -> &'static [ThemeConfig] {
    &BUILTIN_THEMES
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_theme_ids_are_unique() {
        let ids: HashSet<_> = builtin_themes().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), builtin_themes().len());
        assert!(ids.contains(DEFAULT_THEME_ID));
    }

    #[test]
    fn test_gradient_angles_in_range() {
        assert!(builtin_themes().iter().all(|t| t.gradient_angle < 360));
    }
}
