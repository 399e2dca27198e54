//! 版式计算
//!
//! SlideDocument + ThemeConfig → 与文件格式无关的幻灯片模型（形状、填充、段落）。
//! 坐标单位为 EMU（1 英寸 = 914400），画布固定 16:9。

use crate::domain::presentation::{ContentType, Slide, SlideDocument};
use crate::domain::theme::{glyph_for, LayoutPreference, Rgb, ThemeConfig};

/// 画布宽（13.333 英寸）
pub const SLIDE_WIDTH: i64 = 12_192_000;
/// 画布高（7.5 英寸）
pub const SLIDE_HEIGHT: i64 = 6_858_000;

const MARGIN: i64 = 457_200;
const CONTENT_WIDTH: i64 = SLIDE_WIDTH - 2 * MARGIN;
const TITLE_Y: i64 = 342_900;
const TITLE_HEIGHT: i64 = 1_005_840;
const ACCENT_Y: i64 = 1_371_600;
const BODY_Y: i64 = 1_600_200;
const BODY_HEIGHT: i64 = SLIDE_HEIGHT - BODY_Y - MARGIN;
const COLUMN_GAP: i64 = 365_760;
const COLUMN_WIDTH: i64 = (CONTENT_WIDTH - COLUMN_GAP) / 2;
const HEADER_HEIGHT: i64 = 548_640;

/// 两栏版式右栏最多借用的要点数
const BORROWED_POINTS: usize = 3;
/// 图片版式下方最多列出的要点数
const IMAGE_CAPTION_POINTS: usize = 4;

/// 渲染选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// 关闭时所有渐变退化为起始色纯色填充
    pub gradients: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { gradients: true }
    }
}

/// 填充
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Solid(Rgb),
    /// `angle` 沿用主题的 CSS 角度（度）
    Gradient { start: Rgb, end: Rgb, angle: u16 },
}

impl Fill {
    fn gradient(start: Rgb, end: Rgb, angle: u16, options: RenderOptions) -> Self {
        if options.gradients {
            Fill::Gradient { start, end, angle }
        } else {
            Fill::Solid(start)
        }
    }
}

/// 水平对齐
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Justify,
}

/// 垂直锚点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Top,
    Middle,
}

/// 文字样式（字号单位 pt）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub font: &'static str,
    pub size: u16,
    pub color: Rgb,
    pub bold: bool,
    pub italic: bool,
}

impl TextStyle {
    fn new(font: &'static str, size: u16, color: Rgb) -> Self {
        Self {
            font,
            size,
            color,
            bold: false,
            italic: false,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// 段落前缀（要点字形或序号）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    pub text: String,
    pub color: Rgb,
}

/// 段落
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub prefix: Option<Prefix>,
    pub text: String,
    pub style: TextStyle,
    pub align: Align,
    /// 段后间距（pt）
    pub space_after: u16,
}

impl Paragraph {
    fn plain(text: impl Into<String>, style: TextStyle, align: Align) -> Self {
        Self {
            prefix: None,
            text: text.into(),
            style,
            align,
            space_after: 6,
        }
    }

    fn prefixed(prefix: Prefix, text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            prefix: Some(prefix),
            text: text.into(),
            style,
            align: Align::Left,
            space_after: 10,
        }
    }
}

/// 形状位置与尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Frame {
    pub const fn new(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        Self { x, y, cx, cy }
    }
}

/// 形状
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Text {
        name: &'static str,
        frame: Frame,
        fill: Option<Fill>,
        anchor: Anchor,
        paragraphs: Vec<Paragraph>,
    },
    /// 纯色块（强调条、图片占位框）
    Block { name: &'static str, frame: Frame, fill: Fill },
}

/// 单页模型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideModel {
    pub background: Fill,
    pub shapes: Vec<Shape>,
}

impl SlideModel {
    /// 本页全部非空文字
    pub fn text_runs(&self) -> impl Iterator<Item = &str> {
        self.shapes
            .iter()
            .filter_map(|shape| match shape {
                Shape::Text { paragraphs, .. } => Some(paragraphs),
                Shape::Block { .. } => None,
            })
            .flatten()
            .map(|p| p.text.as_str())
            .filter(|t| !t.trim().is_empty())
    }
}

/// 整份文档排版：标题页 + 每张幻灯片一页
pub fn layout_deck(
    document: &SlideDocument,
    theme: &ThemeConfig,
    options: RenderOptions,
) -> Vec<SlideModel> {
    std::iter::once(title_slide(document, theme, options))
        .chain(
            document
                .slides
                .iter()
                .map(|slide| layout_slide(slide, theme, options)),
        )
        .collect()
}

/// 标题页: 主色到辅色的渐变，标题与描述居中
fn title_slide(document: &SlideDocument, theme: &ThemeConfig, options: RenderOptions) -> SlideModel {
    let c = &theme.color_scheme;
    let f = &theme.font_scheme;

    let mut paragraphs = vec![Paragraph {
        space_after: 18,
        ..Paragraph::plain(
            document.title.clone(),
            TextStyle::new(f.title_font, f.title_size + 8, c.text_light).bold(),
            Align::Center,
        )
    }];
    if !document.description.trim().is_empty() {
        paragraphs.push(Paragraph::plain(
            document.description.clone(),
            TextStyle::new(f.content_font, f.subtitle_size, c.text_light),
            Align::Center,
        ));
    }

    SlideModel {
        background: Fill::gradient(c.primary, c.secondary, theme.gradient_angle, options),
        shapes: vec![Shape::Text {
            name: "Title",
            frame: Frame::new(MARGIN, 2_057_400, CONTENT_WIDTH, 2_743_200),
            fill: None,
            anchor: Anchor::Middle,
            paragraphs,
        }],
    }
}

fn layout_slide(slide: &Slide, theme: &ThemeConfig, options: RenderOptions) -> SlideModel {
    if slide.content_type == ContentType::TitleOnly {
        return section_slide(slide, theme);
    }

    let c = &theme.color_scheme;
    let mut shapes = vec![
        heading(&slide.title, theme),
        Shape::Block {
            name: "Accent",
            frame: Frame::new(MARGIN, ACCENT_Y, 1_828_800, 54_864),
            fill: Fill::Solid(c.accent),
        },
    ];

    match slide.content_type {
        ContentType::BulletPoints => shapes.push(body(
            Frame::new(MARGIN, BODY_Y, CONTENT_WIDTH, BODY_HEIGHT),
            bullets(&slide.bullet_points, theme),
        )),
        ContentType::NumberedList => shapes.push(body(
            Frame::new(MARGIN, BODY_Y, CONTENT_WIDTH, BODY_HEIGHT),
            numbered(&slide.bullet_points, theme),
        )),
        ContentType::Paragraph => shapes.push(body(
            Frame::new(MARGIN, BODY_Y, CONTENT_WIDTH, BODY_HEIGHT),
            prose(slide.content.as_deref().unwrap_or_default(), theme),
        )),
        ContentType::TwoColumn => shapes.extend(two_column(slide, theme)),
        ContentType::Comparison => shapes.extend(comparison(slide, theme)),
        ContentType::ImageFocus => shapes.extend(image_focus(slide, theme)),
        ContentType::TitleOnly => {}
    }

    SlideModel {
        background: Fill::gradient(
            c.background_start,
            c.background_end,
            theme.gradient_angle,
            options,
        ),
        shapes,
    }
}

/// 章节页: 主色纯色背景，标题居中
fn section_slide(slide: &Slide, theme: &ThemeConfig) -> SlideModel {
    let c = &theme.color_scheme;
    let f = &theme.font_scheme;
    let mut paragraphs = vec![Paragraph::plain(
        slide.title.clone(),
        TextStyle::new(f.title_font, f.title_size + 4, c.text_light).bold(),
        Align::Center,
    )];
    if let Some(content) = slide.content.as_deref().filter(|s| !s.trim().is_empty()) {
        paragraphs.push(Paragraph::plain(
            content,
            TextStyle::new(f.content_font, f.subtitle_size, c.text_light),
            Align::Center,
        ));
    }

    SlideModel {
        background: Fill::Solid(c.primary),
        shapes: vec![Shape::Text {
            name: "Title",
            frame: Frame::new(MARGIN, 2_286_000, CONTENT_WIDTH, 2_286_000),
            fill: None,
            anchor: Anchor::Middle,
            paragraphs,
        }],
    }
}

fn heading(title: &str, theme: &ThemeConfig) -> Shape {
    let f = &theme.font_scheme;
    Shape::Text {
        name: "Title",
        frame: Frame::new(MARGIN, TITLE_Y, CONTENT_WIDTH, TITLE_HEIGHT),
        fill: None,
        anchor: Anchor::Middle,
        paragraphs: vec![Paragraph::plain(
            title,
            TextStyle::new(f.title_font, f.title_size, theme.color_scheme.text_primary).bold(),
            Align::Left,
        )],
    }
}

fn body(frame: Frame, paragraphs: Vec<Paragraph>) -> Shape {
    Shape::Text {
        name: "Content",
        frame,
        fill: None,
        anchor: Anchor::Top,
        paragraphs,
    }
}

fn bullet_style(theme: &ThemeConfig) -> TextStyle {
    let f = &theme.font_scheme;
    let size = match theme.layout_preference {
        LayoutPreference::TextHeavy => f.bullet_size.saturating_sub(2).max(12),
        _ => f.bullet_size,
    };
    TextStyle::new(f.content_font, size, theme.color_scheme.text_primary)
}

/// 要点段落: 前缀字形由图标风格和要点文本决定
fn bullets(items: &[String], theme: &ThemeConfig) -> Vec<Paragraph> {
    let style = bullet_style(theme);
    items
        .iter()
        .map(|item| {
            let prefix = Prefix {
                text: glyph_for(theme.icon_style, item).to_string(),
                color: theme.color_scheme.accent,
            };
            Paragraph::prefixed(prefix, item.clone(), style)
        })
        .collect()
}

fn numbered(items: &[String], theme: &ThemeConfig) -> Vec<Paragraph> {
    let style = bullet_style(theme);
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let prefix = Prefix {
                text: format!("{}.", i + 1),
                color: theme.color_scheme.secondary,
            };
            Paragraph::prefixed(prefix, item.clone(), style)
        })
        .collect()
}

/// 正文按空行分段，两端对齐
fn prose(text: &str, theme: &ThemeConfig) -> Vec<Paragraph> {
    let f = &theme.font_scheme;
    let style = TextStyle::new(f.content_font, f.content_size, theme.color_scheme.text_primary);
    text.split("\n\n")
        .map(|block| block.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|block| !block.is_empty())
        .map(|block| Paragraph {
            space_after: 12,
            ..Paragraph::plain(block, style, Align::Justify)
        })
        .collect()
}

fn column_header(text: &str, color: Rgb, theme: &ThemeConfig) -> Paragraph {
    let f = &theme.font_scheme;
    Paragraph::plain(
        text,
        TextStyle::new(f.title_font, f.subtitle_size, color).bold(),
        Align::Left,
    )
}

/// 两栏: 左栏正文，右栏正文或前几条要点
fn two_column(slide: &Slide, theme: &ThemeConfig) -> Vec<Shape> {
    let left = prose(slide.left_content.as_deref().unwrap_or_default(), theme);
    let right = match slide.right_content.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(text) => prose(text, theme),
        None => {
            let borrowed: Vec<String> = slide
                .bullet_points
                .iter()
                .take(BORROWED_POINTS)
                .cloned()
                .collect();
            bullets(&borrowed, theme)
        }
    };

    let right_x = MARGIN + COLUMN_WIDTH + COLUMN_GAP;
    vec![
        body(Frame::new(MARGIN, BODY_Y, COLUMN_WIDTH, BODY_HEIGHT), left),
        body(Frame::new(right_x, BODY_Y, COLUMN_WIDTH, BODY_HEIGHT), right),
    ]
}

/// 对比: 左右表头分别用辅色与强调色
fn comparison(slide: &Slide, theme: &ThemeConfig) -> Vec<Shape> {
    let c = &theme.color_scheme;
    let right_x = MARGIN + COLUMN_WIDTH + COLUMN_GAP;
    let list_y = BODY_Y + HEADER_HEIGHT;
    let list_height = BODY_HEIGHT - HEADER_HEIGHT;

    let header = |x: i64, text: Option<&str>, fallback: &str, color: Rgb| Shape::Text {
        name: "Header",
        frame: Frame::new(x, BODY_Y, COLUMN_WIDTH, HEADER_HEIGHT),
        fill: None,
        anchor: Anchor::Middle,
        paragraphs: vec![column_header(text.unwrap_or(fallback), color, theme)],
    };

    vec![
        header(MARGIN, slide.left_title.as_deref(), "Option A", c.secondary),
        header(right_x, slide.right_title.as_deref(), "Option B", c.accent),
        body(
            Frame::new(MARGIN, list_y, COLUMN_WIDTH, list_height),
            bullets(&slide.left_points, theme),
        ),
        body(
            Frame::new(right_x, list_y, COLUMN_WIDTH, list_height),
            bullets(&slide.right_points, theme),
        ),
    ]
}

/// 图片版式: 带边框的描述区 + 下方最多 4 条要点
fn image_focus(slide: &Slide, theme: &ThemeConfig) -> Vec<Shape> {
    let c = &theme.color_scheme;
    let f = &theme.font_scheme;
    let frame_height = match theme.layout_preference {
        LayoutPreference::VisualFocused => BODY_HEIGHT * 65 / 100,
        _ => BODY_HEIGHT / 2,
    };
    let description = slide
        .image_description
        .as_deref()
        .or(slide.content.as_deref())
        .unwrap_or(slide.title.as_str());

    let mut shapes = vec![
        Shape::Block {
            name: "Image Frame",
            frame: Frame::new(MARGIN, BODY_Y, CONTENT_WIDTH, frame_height),
            fill: Fill::Solid(c.secondary),
        },
        Shape::Text {
            name: "Image Description",
            frame: Frame::new(
                MARGIN + 45_720,
                BODY_Y + 45_720,
                CONTENT_WIDTH - 91_440,
                frame_height - 91_440,
            ),
            fill: Some(Fill::Solid(c.background_start)),
            anchor: Anchor::Middle,
            paragraphs: vec![Paragraph::plain(
                description,
                TextStyle::new(f.content_font, f.content_size, c.text_secondary).italic(),
                Align::Center,
            )],
        },
    ];

    let points: Vec<String> = slide
        .bullet_points
        .iter()
        .take(IMAGE_CAPTION_POINTS)
        .cloned()
        .collect();
    if !points.is_empty() {
        let y = BODY_Y + frame_height + 182_880;
        shapes.push(body(
            Frame::new(MARGIN, y, CONTENT_WIDTH, BODY_Y + BODY_HEIGHT - y),
            bullets(&points, theme),
        ));
    }
    shapes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::theme::ThemeRegistry;

    fn theme(id: &str) -> ThemeConfig {
        *ThemeRegistry::builtin().get(id)
    }

    fn document(slides: Vec<Slide>) -> SlideDocument {
        SlideDocument {
            title: "Deck".to_string(),
            description: "About things".to_string(),
            slides,
        }
    }

    fn texts(model: &SlideModel) -> Vec<&str> {
        model.text_runs().collect()
    }

    #[test]
    fn test_title_slide_gradient_and_solid() {
        let t = theme("ocean_depths");
        let doc = document(vec![]);

        let deck = layout_deck(&doc, &t, RenderOptions::default());
        assert_eq!(deck.len(), 1);
        assert_eq!(
            deck[0].background,
            Fill::Gradient {
                start: t.color_scheme.primary,
                end: t.color_scheme.secondary,
                angle: t.gradient_angle,
            }
        );
        assert_eq!(texts(&deck[0]), vec!["Deck", "About things"]);

        let flat = layout_deck(&doc, &t, RenderOptions { gradients: false });
        assert_eq!(flat[0].background, Fill::Solid(t.color_scheme.primary));
    }

    #[test]
    fn test_section_slide_uses_primary_background() {
        let t = theme("corporate_blue");
        let doc = document(vec![Slide::new("Intermission", ContentType::TitleOnly)]);

        let deck = layout_deck(&doc, &t, RenderOptions::default());
        assert_eq!(deck[1].background, Fill::Solid(t.color_scheme.primary));
        assert_eq!(texts(&deck[1]), vec!["Intermission"]);
    }

    #[test]
    fn test_numbered_list_prefixes() {
        let t = theme("corporate_blue");
        let doc = document(vec![
            Slide::new("Steps", ContentType::NumberedList).with_bullets(["Plan", "Build", "Ship"])
        ]);

        let deck = layout_deck(&doc, &t, RenderOptions::default());
        let prefixes: Vec<String> = deck[1]
            .shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Text { name: "Content", paragraphs, .. } => Some(paragraphs),
                _ => None,
            })
            .flatten()
            .filter_map(|p| p.prefix.as_ref().map(|x| x.text.clone()))
            .collect();
        assert_eq!(prefixes, vec!["1.", "2.", "3."]);
    }

    #[test]
    fn test_paragraph_splits_on_blank_lines() {
        let t = theme("corporate_blue");
        let doc = document(vec![Slide::new("Story", ContentType::Paragraph)
            .with_content("First part\nstill first.\n\nSecond part.")]);

        let deck = layout_deck(&doc, &t, RenderOptions::default());
        assert_eq!(
            texts(&deck[1]),
            vec!["Story", "First part still first.", "Second part."]
        );
    }

    #[test]
    fn test_two_column_borrows_bullets_for_right_column() {
        let t = theme("corporate_blue");
        let mut slide = Slide::new("Split", ContentType::TwoColumn)
            .with_bullets(["one", "two", "three", "four"]);
        slide.left_content = Some("Left side".to_string());
        let doc = document(vec![slide]);

        let deck = layout_deck(&doc, &t, RenderOptions::default());
        assert_eq!(
            texts(&deck[1]),
            vec!["Split", "Left side", "one", "two", "three"]
        );
    }

    #[test]
    fn test_comparison_headers_use_secondary_and_accent() {
        let t = theme("corporate_blue");
        let mut slide = Slide::new("Versus", ContentType::Comparison);
        slide.left_points = vec!["fast".to_string()];
        slide.right_points = vec!["cheap".to_string()];
        let doc = document(vec![slide]);

        let deck = layout_deck(&doc, &t, RenderOptions::default());
        let header_colors: Vec<Rgb> = deck[1]
            .shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Text { name: "Header", paragraphs, .. } => Some(paragraphs[0].style.color),
                _ => None,
            })
            .collect();
        assert_eq!(
            header_colors,
            vec![t.color_scheme.secondary, t.color_scheme.accent]
        );
        assert!(texts(&deck[1]).contains(&"Option A"));
    }

    #[test]
    fn test_content_background_respects_gradient_option() {
        let t = theme("corporate_blue");
        let doc = document(vec![Slide::new("A", ContentType::BulletPoints).with_bullets(["x"])]);

        let flat = layout_deck(&doc, &t, RenderOptions { gradients: false });
        assert_eq!(flat[1].background, Fill::Solid(t.color_scheme.background_start));
    }
}
