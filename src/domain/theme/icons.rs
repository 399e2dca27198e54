//! 图标词表
//!
//! 每种图标风格一张 (关键词, 字形) 表；要点文本中第一个命中的条目决定前缀字形

use super::value_objects::IconStyle;

/// 默认要点字形
pub const PLAIN_BULLET: &str = "•";

/// 概念关键词（按词前缀匹配，小写）
const GROWTH: &[&str] = &["growth", "grow", "increas", "rise", "expan", "scal"];
const MONEY: &[&str] = &["revenue", "profit", "cost", "budget", "money", "financ", "price", "sales"];
const IDEA: &[&str] = &["idea", "innovat", "creativ", "insight", "invent"];
const GOAL: &[&str] = &["goal", "target", "objective", "mission", "strateg"];
const PEOPLE: &[&str] = &["team", "people", "customer", "user", "communit", "partner"];
const TIME: &[&str] = &["time", "schedule", "deadline", "timeline", "quarter", "year"];
const SECURITY: &[&str] = &["secur", "risk", "safe", "protect", "complian"];
const DATA: &[&str] = &["data", "analy", "metric", "statistic", "measur", "result"];
const GLOBAL: &[&str] = &["global", "world", "international", "market"];
const SUCCESS: &[&str] = &["success", "achiev", "win", "award", "milestone"];

type Vocabulary = [(&'static [&'static str], &'static str); 10];

const MODERN: Vocabulary = [
    (GROWTH, "📈"),
    (MONEY, "💰"),
    (IDEA, "💡"),
    (GOAL, "🎯"),
    (PEOPLE, "👥"),
    (TIME, "⏱"),
    (SECURITY, "🔒"),
    (DATA, "📊"),
    (GLOBAL, "🌐"),
    (SUCCESS, "🏆"),
];

const CLASSIC: Vocabulary = [
    (GROWTH, "▲"),
    (MONEY, "◆"),
    (IDEA, "★"),
    (GOAL, "►"),
    (PEOPLE, "●"),
    (TIME, "◷"),
    (SECURITY, "■"),
    (DATA, "▪"),
    (GLOBAL, "○"),
    (SUCCESS, "✔"),
];

const MINIMAL: Vocabulary = [
    (GROWTH, "↑"),
    (MONEY, "¤"),
    (IDEA, "+"),
    (GOAL, "→"),
    (PEOPLE, "·"),
    (TIME, "–"),
    (SECURITY, "!"),
    (DATA, "#"),
    (GLOBAL, "○"),
    (SUCCESS, "✓"),
];

const CREATIVE: Vocabulary = [
    (GROWTH, "🚀"),
    (MONEY, "💎"),
    (IDEA, "✨"),
    (GOAL, "🎯"),
    (PEOPLE, "🤝"),
    (TIME, "⏳"),
    (SECURITY, "🛡"),
    (DATA, "🔍"),
    (GLOBAL, "🌍"),
    (SUCCESS, "🌟"),
];

fn vocabulary(style: IconStyle) -> &'static Vocabulary {
    match style {
        IconStyle::Modern => &MODERN,
        IconStyle::Classic => &CLASSIC,
        IconStyle::Minimal => &MINIMAL,
        IconStyle::Creative => &CREATIVE,
    }
}

/// 为要点文本选择前缀字形
///
/// 词表顺序优先；无命中返回 [`PLAIN_BULLET`]
pub fn glyph_for(style: IconStyle, text: &str) -> &'static str {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    vocabulary(style)
        .iter()
        .find(|(keywords, _)| {
            keywords
                .iter()
                .any(|k| words.iter().any(|w| w.starts_with(k)))
        })
        .map(|(_, glyph)| *glyph)
        .unwrap_or(PLAIN_BULLET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_match_picks_style_glyph() {
        assert_eq!(glyph_for(IconStyle::Modern, "Strong growth in Q3"), "📈");
        assert_eq!(glyph_for(IconStyle::Classic, "Lower operating COST"), "◆");
        assert_eq!(glyph_for(IconStyle::Creative, "A new idea"), "✨");
    }

    #[test]
    fn test_first_vocabulary_entry_wins() {
        // "growth" 与 "revenue" 同时命中，词表中 GROWTH 在前
        assert_eq!(glyph_for(IconStyle::Minimal, "Revenue growth"), "↑");
    }

    #[test]
    fn test_no_match_uses_plain_bullet() {
        assert_eq!(glyph_for(IconStyle::Modern, "Lorem ipsum dolor"), PLAIN_BULLET);
        assert_eq!(glyph_for(IconStyle::Classic, ""), PLAIN_BULLET);
    }

    #[test]
    fn test_matches_word_prefix_only() {
        // "upscale" 不以 "scal" 开头
        assert_eq!(glyph_for(IconStyle::Modern, "upscale dining"), PLAIN_BULLET);
    }
}
