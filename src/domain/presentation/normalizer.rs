//! Output Normalizer - 模型输出规范化
//!
//! 把不可靠的模型文本转换成以下之一:
//! - 可直接渲染的 HTML 文本
//! - 满足 SlideDocument 结构、已补全默认值的文档
//! - Missing（没有可抽取的结构）
//!
//! 对格式错误的输入从不报错，最坏退化为最小合法文档

use serde_json::{Map, Value};

use super::document::{ContentType, Slide, SlideDocument, DEFAULT_DESCRIPTION, DEFAULT_TITLE};
use super::markup::{strip_list_marker, strip_markup};

/// 围栏语言标签（无换行时按前缀剥离）
const FENCE_LABELS: &[&str] = &["json", "html", "javascript", "js"];

/// 占位要点数量
const PLACEHOLDER_POINTS: usize = 3;

const TITLE_KEYS: &[&str] = &["title", "presentation_title", "presentationTitle"];
const DESCRIPTION_KEYS: &[&str] = &[
    "description",
    "presentation_description",
    "presentationDescription",
    "subtitle",
];
const SLIDE_TITLE_KEYS: &[&str] = &["title", "heading"];
const CONTENT_TYPE_KEYS: &[&str] = &["content_type", "contentType", "type"];
const CONTENT_KEYS: &[&str] = &["content", "text", "body"];
const BULLET_KEYS: &[&str] = &[
    "bullet_points",
    "bulletPoints",
    "bullets",
    "points",
    "key_points",
    "keyPoints",
    "items",
];
const LEFT_CONTENT_KEYS: &[&str] = &["left_content", "leftContent"];
const RIGHT_CONTENT_KEYS: &[&str] = &["right_content", "rightContent"];
const LEFT_TITLE_KEYS: &[&str] = &["left_title", "leftTitle"];
const RIGHT_TITLE_KEYS: &[&str] = &["right_title", "rightTitle"];
const LEFT_POINTS_KEYS: &[&str] = &["left_points", "leftPoints"];
const RIGHT_POINTS_KEYS: &[&str] = &["right_points", "rightPoints"];
const IMAGE_KEYS: &[&str] = &["image_description", "imageDescription", "image_descriptions"];
const NOTES_KEYS: &[&str] = &["notes", "speaker_notes", "speakerNotes"];
const LIST_ITEM_KEYS: &[&str] = &["text", "point", "title", "content"];

/// 规范化结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedOutput {
    /// 以 HTML 文档开头，可直接作为产物
    Html(String),
    /// 结构化文档（已补全默认值）
    Document(SlideDocument),
    /// 没有可抽取的结构
    Missing,
}

impl NormalizedOutput {
    pub fn kind(&self) -> &'static str {
        match self {
            NormalizedOutput::Html(_) => "html",
            NormalizedOutput::Document(_) => "document",
            NormalizedOutput::Missing => "missing",
        }
    }
}

/// 剥离首尾的 Markdown 代码围栏（```json / ```html / ```）
pub fn strip_code_fences(text: &str) -> &str {
    let mut t = text.trim();

    if let Some(rest) = t.strip_prefix("```") {
        t = match rest.find('\n') {
            Some(idx) if is_fence_label(&rest[..idx]) => &rest[idx + 1..],
            _ => FENCE_LABELS
                .iter()
                .find_map(|label| rest.strip_prefix(label))
                .unwrap_or(rest),
        };
    }

    let t = t.trim_end();
    t.strip_suffix("```").unwrap_or(t).trim()
}

fn is_fence_label(s: &str) -> bool {
    s.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// 是否以 HTML 文档标记开头
fn is_html_document(text: &str) -> bool {
    let head: String = text.chars().take(16).collect::<String>().to_lowercase();
    head.starts_with("<!doctype html") || head.starts_with("<html")
}

/// 定位最外层 `{ ... }` 片段
pub fn extract_json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

/// 规范化一段模型输出文本
pub fn normalize_text(raw: &str) -> NormalizedOutput {
    let cleaned = strip_code_fences(raw);

    if is_html_document(cleaned) {
        return NormalizedOutput::Html(cleaned.to_string());
    }

    let Some(span) = extract_json_span(cleaned) else {
        tracing::debug!(len = cleaned.len(), "No JSON object found in model output");
        return NormalizedOutput::Missing;
    };

    match serde_json::from_str::<Value>(span) {
        Ok(value) => NormalizedOutput::Document(normalize_value(&value)),
        Err(e) => {
            tracing::warn!(error = %e, "Model output looked like JSON but failed to parse");
            NormalizedOutput::Missing
        }
    }
}

/// 把任意 JSON 值规范化为合法 SlideDocument
pub fn normalize_value(value: &Value) -> SlideDocument {
    let Some(root) = value.as_object() else {
        return SlideDocument::default();
    };

    // 有些模型会再包一层 {"presentation": {...}}
    let obj = match root.get("presentation").and_then(Value::as_object) {
        Some(inner) if !root.contains_key("slides") => inner,
        _ => root,
    };

    let title = text_field(obj, TITLE_KEYS)
        .map(|t| clean_line(&t))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let description = text_field(obj, DESCRIPTION_KEYS).unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

    let slides = match obj.get("slides") {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| normalize_slide(i, item))
            .collect(),
        _ => Vec::new(),
    };

    SlideDocument {
        title,
        description,
        slides,
    }
}

/// 重新规范化已有文档（对已规范化的文档是恒等变换）
pub fn normalize_document(doc: &SlideDocument) -> SlideDocument {
    match serde_json::to_value(doc) {
        Ok(value) => normalize_value(&value),
        Err(_) => doc.clone(),
    }
}

fn normalize_slide(index: usize, value: &Value) -> Slide {
    let number = index + 1;
    let empty = Map::new();
    let (obj, bare_title) = match value {
        Value::Object(map) => (map, None),
        Value::String(s) => (&empty, Some(clean_line(s))),
        _ => (&empty, None),
    };

    let title = bare_title
        .or_else(|| text_field(obj, SLIDE_TITLE_KEYS).map(|t| clean_line(&t)))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| format!("Slide {number}"));

    let content_type = text_field(obj, CONTENT_TYPE_KEYS)
        .and_then(|t| ContentType::parse(&t))
        .unwrap_or(ContentType::BulletPoints);

    let mut slide = Slide {
        title,
        content_type,
        content: text_field(obj, CONTENT_KEYS),
        bullet_points: list_field(obj, BULLET_KEYS),
        left_content: text_field(obj, LEFT_CONTENT_KEYS),
        right_content: text_field(obj, RIGHT_CONTENT_KEYS),
        left_title: text_field(obj, LEFT_TITLE_KEYS).map(|t| clean_line(&t)),
        right_title: text_field(obj, RIGHT_TITLE_KEYS).map(|t| clean_line(&t)),
        left_points: list_field(obj, LEFT_POINTS_KEYS),
        right_points: list_field(obj, RIGHT_POINTS_KEYS),
        image_description: text_field(obj, IMAGE_KEYS),
        notes: text_field(obj, NOTES_KEYS),
    };
    fill_payload(&mut slide);
    slide
}

/// 按内容类型补全负载字段，保证每张幻灯片都可渲染
fn fill_payload(slide: &mut Slide) {
    let title = slide.title.clone();
    match slide.content_type {
        ContentType::TitleOnly => {}
        ContentType::BulletPoints => {
            if slide.bullet_points.is_empty() {
                slide.bullet_points = placeholders(|i| format!("Key point {i} about {title}"));
            }
        }
        ContentType::NumberedList => {
            if slide.bullet_points.is_empty() {
                slide.bullet_points = placeholders(|i| format!("Step {i} of {title}"));
            }
        }
        ContentType::Paragraph => {
            if slide.content.is_none() {
                slide.content = Some(if slide.bullet_points.is_empty() {
                    format!("Overview of {title}.")
                } else {
                    // 跨要点的强调标记拼接后才成对
                    strip_markup(&slide.bullet_points.join("\n\n"))
                });
            }
        }
        ContentType::TwoColumn => {
            if slide.left_content.is_none() {
                slide.left_content = Some(
                    slide
                        .content
                        .clone()
                        .unwrap_or_else(|| format!("Overview of {title}.")),
                );
            }
            if slide.right_content.is_none() && slide.bullet_points.is_empty() {
                slide.right_content = Some(format!("Further details on {title}."));
            }
        }
        ContentType::Comparison => {
            let left = slide
                .left_title
                .get_or_insert_with(|| "Option A".to_string())
                .clone();
            let right = slide
                .right_title
                .get_or_insert_with(|| "Option B".to_string())
                .clone();
            if slide.left_points.is_empty() {
                slide.left_points = placeholders(|i| format!("{left} point {i}"));
            }
            if slide.right_points.is_empty() {
                slide.right_points = placeholders(|i| format!("{right} point {i}"));
            }
        }
        ContentType::ImageFocus => {
            if slide.image_description.is_none() {
                slide.image_description = Some(format!("Illustration of {title}"));
            }
        }
    }
}

fn placeholders(make: impl Fn(usize) -> String) -> Vec<String> {
    (1..=PLACEHOLDER_POINTS).map(make).collect()
}

/// 单行文本清洗：强调标记 + 列表标记，直到稳定
fn clean_line(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = strip_list_marker(&strip_markup(&current));
        if next == current {
            return current;
        }
        current = next;
    }
}

fn first_present<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

/// 读取文本字段：字符串、数字、字符串数组（以空行拼接）
fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    let raw = match first_present(obj, keys)? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(scalar_text)
            .collect::<Vec<_>>()
            .join("\n\n"),
        _ => return None,
    };
    let cleaned = strip_markup(&raw);
    (!cleaned.is_empty()).then_some(cleaned)
}

/// 读取列表字段：数组（字符串或对象）或按行拆分的字符串
fn list_field(obj: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    let items: Vec<String> = match first_present(obj, keys) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(map) => LIST_ITEM_KEYS
                    .iter()
                    .filter_map(|k| map.get(*k))
                    .find_map(scalar_text),
                other => scalar_text(other),
            })
            .collect(),
        Some(Value::String(s)) => s.lines().map(str::to_string).collect(),
        _ => Vec::new(),
    };

    items
        .iter()
        .map(|item| clean_line(item))
        .filter(|item| !item.is_empty())
        .collect()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: &str = r#"{"presentation_title": "Solar Power", "slides": [{"title": "Why Solar", "content_type": "bullet_points", "bullet_points": ["Cheap", "Clean"]}]}"#;

    fn document(output: NormalizedOutput) -> SlideDocument {
        match output {
            NormalizedOutput::Document(doc) => doc,
            other => panic!("expected document, got {}", other.kind()),
        }
    }

    #[test]
    fn test_fenced_json_parses_like_unwrapped() {
        let plain = document(normalize_text(SAMPLE));
        for wrapped in [
            format!("```json\n{SAMPLE}\n```"),
            format!("```html\n{SAMPLE}\n```"),
            format!("```\n{SAMPLE}\n```"),
            format!("```json{SAMPLE}```"),
            format!("  ```json\n{SAMPLE}\n```  \n"),
        ] {
            assert_eq!(document(normalize_text(&wrapped)), plain);
        }
    }

    #[test]
    fn test_json_surrounded_by_prose() {
        let text = format!("Here is your plan:\n{SAMPLE}\nLet me know if you need changes.");
        let doc = document(normalize_text(&text));
        assert_eq!(doc.title, "Solar Power");
        assert_eq!(doc.slides.len(), 1);
    }

    #[test]
    fn test_html_short_circuits() {
        let out = normalize_text("```html\n<!DOCTYPE html><html><body>Hi</body></html>\n```");
        assert_eq!(
            out,
            NormalizedOutput::Html("<!DOCTYPE html><html><body>Hi</body></html>".to_string())
        );
        assert!(matches!(normalize_text("<html><p>x</p></html>"), NormalizedOutput::Html(_)));
    }

    #[test]
    fn test_unparseable_or_absent_structure_is_missing() {
        assert_eq!(normalize_text("no structure here"), NormalizedOutput::Missing);
        assert_eq!(normalize_text("{ title: broken, }"), NormalizedOutput::Missing);
        assert_eq!(normalize_text("} backwards {"), NormalizedOutput::Missing);
    }

    #[test]
    fn test_top_level_defaults() {
        let doc = normalize_value(&json!({}));
        assert_eq!(doc.title, DEFAULT_TITLE);
        assert_eq!(doc.description, DEFAULT_DESCRIPTION);
        assert!(doc.slides.is_empty());

        let doc = normalize_value(&json!({"slides": "not a list"}));
        assert!(doc.slides.is_empty());
    }

    #[test]
    fn test_missing_content_type_becomes_bullets_with_placeholders() {
        let doc = normalize_value(&json!({"slides": [{"title": "Intro"}]}));
        let slide = &doc.slides[0];
        assert_eq!(slide.content_type, ContentType::BulletPoints);
        assert_eq!(slide.bullet_points.len(), 3);
        assert!(slide.bullet_points.iter().all(|b| !b.is_empty()));
    }

    #[test]
    fn test_unknown_content_type_and_missing_title() {
        let doc = normalize_value(&json!({"slides": [{}, {"content_type": "hologram"}]}));
        assert_eq!(doc.slides[0].title, "Slide 1");
        assert_eq!(doc.slides[1].title, "Slide 2");
        assert_eq!(doc.slides[1].content_type, ContentType::BulletPoints);
    }

    #[test]
    fn test_non_object_slides_are_kept_renderable() {
        let doc = normalize_value(&json!({"slides": ["Just a title", 42]}));
        assert_eq!(doc.slides[0].title, "Just a title");
        assert_eq!(doc.slides[1].title, "Slide 2");
        assert_eq!(doc.slides[1].bullet_points.len(), 3);
    }

    #[test]
    fn test_camel_case_aliases_and_type_payloads() {
        let doc = normalize_value(&json!({
            "title": "Deck",
            "slides": [
                {"title": "Compare", "contentType": "comparison", "leftTitle": "Old", "leftPoints": ["slow"]},
                {"title": "Split", "contentType": "two_column", "bulletPoints": ["a", "b", "c", "d"]},
                {"title": "Picture", "contentType": "image_focus"},
                {"title": "Text", "contentType": "paragraph", "keyPoints": ["one", "two"]}
            ]
        }));
        let cmp = &doc.slides[0];
        assert_eq!(cmp.left_title.as_deref(), Some("Old"));
        assert_eq!(cmp.right_title.as_deref(), Some("Option B"));
        assert_eq!(cmp.left_points, vec!["slow"]);
        assert_eq!(cmp.right_points.len(), 3);

        let split = &doc.slides[1];
        assert!(split.left_content.is_some());
        assert!(split.right_content.is_none());

        assert_eq!(
            doc.slides[2].image_description.as_deref(),
            Some("Illustration of Picture")
        );
        assert_eq!(doc.slides[3].content.as_deref(), Some("one\n\ntwo"));
    }

    #[test]
    fn test_markup_is_stripped_from_all_text() {
        let doc = normalize_value(&json!({
            "title": "**Bold Deck**",
            "slides": [{
                "title": "## *Heading*",
                "content_type": "bullet_points",
                "bullet_points": ["- **first**", "2. `second`", "   "],
                "content": "~~gone~~ stays"
            }]
        }));
        assert_eq!(doc.title, "Bold Deck");
        let slide = &doc.slides[0];
        assert_eq!(slide.title, "Heading");
        assert_eq!(slide.bullet_points, vec!["first", "second"]);
        assert_eq!(slide.content.as_deref(), Some("gone stays"));
    }

    #[test]
    fn test_bullets_from_multiline_string_and_objects() {
        let doc = normalize_value(&json!({"slides": [
            {"title": "A", "bullet_points": "- one\n- two\n\n- three"},
            {"title": "B", "bullet_points": [{"text": "x"}, {"point": "y"}, {"other": 1}]}
        ]}));
        assert_eq!(doc.slides[0].bullet_points, vec!["one", "two", "three"]);
        assert_eq!(doc.slides[1].bullet_points, vec!["x", "y"]);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let doc = normalize_value(&json!({
            "presentation_title": "*Deck*",
            "slides": [
                {"title": "One"},
                {"title": "Two", "content_type": "comparison"},
                {"title": "Three", "content_type": "two_column", "content": "left side"},
                {"title": "Four", "content_type": "paragraph"},
                {"title": "Five", "content_type": "numbered_list", "bullet_points": ["1. a", "2. b"]},
                {"title": "Six", "content_type": "image_focus", "image_descriptions": ["sun", "panel"]},
                {"title": "Seven", "content_type": "title_only"},
                {"title": "Eight", "content_type": "paragraph", "bullet_points": ["Rated *5", "stars* overall"]}
            ]
        }));
        assert_eq!(normalize_document(&doc), doc);
        assert_eq!(doc.slides[7].content.as_deref(), Some("Rated 5\n\nstars overall"));
    }

    #[test]
    fn test_presentation_wrapper_is_unwrapped() {
        let doc = normalize_value(&json!({"presentation": {"title": "Inner", "slides": [{"title": "S"}]}}));
        assert_eq!(doc.title, "Inner");
        assert_eq!(doc.slides.len(), 1);
    }
}
