//! 合成兜底文档
//!
//! 所有生成阶段都没有产出可用结构时，直接由主题和页数构造一份确定性文档，
//! 保证渲染阶段总有输入

use super::document::{ContentType, Slide, SlideDocument};

/// 内容页轮换的版式
const ROTATION: [ContentType; 4] = [
    ContentType::Paragraph,
    ContentType::BulletPoints,
    ContentType::NumberedList,
    ContentType::TwoColumn,
];

/// 依据主题和页数合成文档（`slide_count` 至少为 1）
pub fn synthetic_document(topic: &str, slide_count: usize) -> SlideDocument {
    let topic = match topic.trim() {
        "" => "Untitled Topic",
        t => t,
    };
    let count = slide_count.max(1);

    let slides = (1..=count)
        .map(|n| synthetic_slide(topic, n, ROTATION[(n - 1) % ROTATION.len()]))
        .collect();

    SlideDocument::new(topic, format!("An overview of {topic}"), slides)
}

fn synthetic_slide(topic: &str, n: usize, content_type: ContentType) -> Slide {
    let title = format!("{topic}: Part {n}");
    let slide = Slide::new(title, content_type);
    match content_type {
        ContentType::Paragraph => slide.with_content(format!(
            "This section introduces part {n} of {topic} and the ideas behind it."
        )),
        ContentType::NumberedList => slide.with_bullets([
            format!("Define the scope of {topic}"),
            "Review the current situation".to_string(),
            "Agree on next steps".to_string(),
        ]),
        ContentType::TwoColumn => {
            let mut slide = slide.with_content(format!("Where {topic} stands today"));
            slide.left_content = slide.content.clone();
            slide.right_content = Some(format!("Where {topic} is heading next"));
            slide
        }
        _ => slide.with_bullets([
            format!("Key facts about {topic}"),
            "Main opportunities".to_string(),
            "Open questions".to_string(),
        ]),
    }
}
