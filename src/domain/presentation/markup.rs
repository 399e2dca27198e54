//! 行内强调标记清洗
//!
//! 渲染引擎把所有文本当纯文本处理，模型常带回 Markdown 强调符号

use regex::Regex;
use std::sync::LazyLock;

static STRIKETHROUGH_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~(.+?)~~").unwrap());

static BOLD_STAR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

static BOLD_UNDERSCORE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.+?)__").unwrap());

/// 斜体：内容首尾不能是空白，避免吃掉 `2 * 3 * 4`
static ITALIC_STAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(\S(?:[^*]*?\S)?)\*").unwrap());

/// 下划线斜体：两侧不能紧贴单词字符，保留 snake_case
static ITALIC_UNDERSCORE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[^\w])_(\S(?:[^_]*?\S)?)_([^\w]|$)").unwrap());

static INLINE_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

static HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]+").unwrap());

static LIST_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*+•▪►]|\d{1,3}[.)])\s+").unwrap());

/// 迭代上限（嵌套标记如 `***x***` 需要多轮）
const MAX_PASSES: usize = 8;

fn strip_once(text: &str) -> String {
    let s = STRIKETHROUGH_REGEX.replace_all(text, "$1");
    let s = BOLD_STAR_REGEX.replace_all(&s, "$1");
    let s = BOLD_UNDERSCORE_REGEX.replace_all(&s, "$1");
    let s = ITALIC_STAR_REGEX.replace_all(&s, "$1");
    let s = ITALIC_UNDERSCORE_REGEX.replace_all(&s, "${1}${2}${3}");
    let s = INLINE_CODE_REGEX.replace_all(&s, "$1");
    let s = HEADING_REGEX.replace_all(&s, "");
    s.into_owned()
}

/// 去除粗体/斜体/代码/删除线/标题标记
///
/// 重复执行直到不再变化，保证幂等
pub fn strip_markup(text: &str) -> String {
    let mut current = text.trim().to_string();
    for _ in 0..MAX_PASSES {
        let next = strip_once(&current).trim().to_string();
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// 去除列表项开头的列表标记（`- `、`* `、`• `、`1. `、`2) `）
pub fn strip_list_marker(text: &str) -> String {
    let mut current = text.trim().to_string();
    for _ in 0..MAX_PASSES {
        let next = LIST_MARKER_REGEX.replace(&current, "").trim().to_string();
        if next == current {
            break;
        }
        current = next;
    }
    current
}
