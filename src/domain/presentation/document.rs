//! Presentation Context - SlideDocument 与 Slide

use serde::{Deserialize, Serialize};

/// 缺失标题时的默认值
pub const DEFAULT_TITLE: &str = "Generated Presentation";

/// 缺失描述时的默认值
pub const DEFAULT_DESCRIPTION: &str = "Created with AI";

/// 幻灯片内容类型（封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    TitleOnly,
    BulletPoints,
    Paragraph,
    NumberedList,
    TwoColumn,
    Comparison,
    ImageFocus,
}

impl ContentType {
    pub const ALL: [ContentType; 7] = [
        ContentType::TitleOnly,
        ContentType::BulletPoints,
        ContentType::Paragraph,
        ContentType::NumberedList,
        ContentType::TwoColumn,
        ContentType::Comparison,
        ContentType::ImageFocus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::TitleOnly => "title_only",
            ContentType::BulletPoints => "bullet_points",
            ContentType::Paragraph => "paragraph",
            ContentType::NumberedList => "numbered_list",
            ContentType::TwoColumn => "two_column",
            ContentType::Comparison => "comparison",
            ContentType::ImageFocus => "image_focus",
        }
    }

    /// 宽松解析：忽略大小写，`-`/空格视同 `_`
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c })
            .collect();
        match key.as_str() {
            "title_only" | "title" | "section" | "section_break" => Some(ContentType::TitleOnly),
            "bullet_points" | "bullets" | "bullet_list" | "list" => Some(ContentType::BulletPoints),
            "paragraph" | "text" | "paragraphs" => Some(ContentType::Paragraph),
            "numbered_list" | "numbered" | "ordered_list" => Some(ContentType::NumberedList),
            "two_column" | "two_columns" | "columns" => Some(ContentType::TwoColumn),
            "comparison" | "compare" => Some(ContentType::Comparison),
            "image_focus" | "image" | "image_focused" => Some(ContentType::ImageFocus),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单张幻灯片
///
/// 不变量（规范化之后）:
/// - `title` 非空
/// - 类型对应的负载字段已填充（见 normalizer）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    pub content_type: ContentType,
    /// 段落正文 / 描述性文字
    pub content: Option<String>,
    pub bullet_points: Vec<String>,
    pub left_content: Option<String>,
    pub right_content: Option<String>,
    pub left_title: Option<String>,
    pub right_title: Option<String>,
    pub left_points: Vec<String>,
    pub right_points: Vec<String>,
    pub image_description: Option<String>,
    /// 演讲者备注
    pub notes: Option<String>,
}

impl Slide {
    /// 只有标题与类型的空白幻灯片
    pub fn new(title: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            title: title.into(),
            content_type,
            content: None,
            bullet_points: Vec::new(),
            left_content: None,
            right_content: None,
            left_title: None,
            right_title: None,
            left_points: Vec::new(),
            right_points: Vec::new(),
            image_description: None,
            notes: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_bullets<I, S>(mut self, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bullet_points = bullets.into_iter().map(Into::into).collect();
        self
    }

    /// 幻灯片包含的全部文字（渲染前检查用）
    pub fn text_fragments(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str())
            .chain(self.content.as_deref())
            .chain(self.bullet_points.iter().map(String::as_str))
            .chain(self.left_content.as_deref())
            .chain(self.right_content.as_deref())
            .chain(self.left_title.as_deref())
            .chain(self.right_title.as_deref())
            .chain(self.left_points.iter().map(String::as_str))
            .chain(self.right_points.iter().map(String::as_str))
            .chain(self.image_description.as_deref())
    }
}

/// 整份演示文稿内容（与视觉样式无关）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDocument {
    pub title: String,
    pub description: String,
    pub slides: Vec<Slide>,
}

impl SlideDocument {
    pub fn new(title: impl Into<String>, description: impl Into<String>, slides: Vec<Slide>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            slides,
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

impl Default for SlideDocument {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, DEFAULT_DESCRIPTION, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_parse_is_lenient() {
        assert_eq!(ContentType::parse("Bullet Points"), Some(ContentType::BulletPoints));
        assert_eq!(ContentType::parse("two-column"), Some(ContentType::TwoColumn));
        assert_eq!(ContentType::parse(" image_focus "), Some(ContentType::ImageFocus));
        assert_eq!(ContentType::parse("hologram"), None);
    }

    #[test]
    fn test_content_type_round_trips_through_str() {
        for ct in ContentType::ALL {
            assert_eq!(ContentType::parse(ct.as_str()), Some(ct));
        }
    }

    #[test]
    fn test_text_fragments_cover_payload() {
        let slide = Slide::new("T", ContentType::BulletPoints)
            .with_content("body")
            .with_bullets(["a", "b"]);
        let parts: Vec<&str> = slide.text_fragments().collect();
        assert_eq!(parts, vec!["T", "body", "a", "b"]);
    }
}
