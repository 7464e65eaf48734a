//! 审查结果格式化
//!
//! 把 AI 返回的自由文本切分为带严重级别的段落，仅用于 UI 展示。
//! 结果是尽力而为、有损的：不保证可逆，也不对应任何服务端结构，
//! 不能作为统计数据的来源。纯函数，无副作用，将来服务端返回结构化
//! 结果时可以直接替换。

use std::sync::LazyLock;

use regex::Regex;

/// 段落起始边界：标记符号、Markdown 标题、数字编号或关键字前缀，必须位于行首
static BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?mi)^[ \t]*(?:❌|🚨|⚠|✅|🔍|💡|#{1,6}[ \t]|\d+\.[ \t]|(?:critical|warning|suggestion|positive)\b)",
    )
    .expect("boundary pattern is valid")
});

/// 标题前缀：空白、`#`、`*`、`-`、编号与标记符号；编号后必须跟空白
static TITLE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[\s#*\-]|\d+\.(?:\s|$)|❌|🚨|⚠|\x{FE0F}|✅|🔍|💡)+").expect("title pattern is valid")
});

static INLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(.+?)\*\*|\*(.+?)\*|`([^`]+)`").expect("inline pattern is valid")
});

// =========================================================
// 严重级别
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Warning,
    Positive,
    Suggestion,
    Info,
}

/// 按优先级排列，首个命中者胜出
const CLASSIFIERS: [(Severity, &[&str]); 4] = [
    (
        Severity::Critical,
        &["❌", "🚨", "critical", "bug", "security", "vulnerab", "issue"],
    ),
    (Severity::Warning, &["⚠", "warning", "caution", "risk"]),
    (
        Severity::Positive,
        &["✅", "positive", "strength", "good", "well done"],
    ),
    (
        Severity::Suggestion,
        &["💡", "suggestion", "improvement", "recommend", "consider"],
    ),
];

impl Severity {
    /// 按首行关键字分类（不区分大小写）
    pub fn classify(line: &str) -> Severity {
        let line = line.to_lowercase();
        CLASSIFIERS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|kw| line.contains(kw)))
            .map(|(severity, _)| *severity)
            .unwrap_or(Severity::Info)
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical Issue",
            Severity::Warning => "Warning",
            Severity::Positive => "What Looks Good",
            Severity::Suggestion => "Suggestion",
            Severity::Info => "Notes",
        }
    }

    /// 卡片配色 (边框, 背景, 图标)
    pub fn palette(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            Severity::Critical => ("border-red-200", "bg-red-50", "text-red-500"),
            Severity::Warning => ("border-orange-200", "bg-orange-50", "text-orange-500"),
            Severity::Positive => ("border-green-200", "bg-green-50", "text-green-500"),
            Severity::Suggestion => ("border-yellow-200", "bg-yellow-50", "text-yellow-500"),
            Severity::Info => ("border-blue-200", "bg-blue-50", "text-blue-500"),
        }
    }
}

// =========================================================
// 段落切分
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSection {
    pub title: String,
    pub content: String,
    pub severity: Severity,
}

impl ReviewSection {
    fn from_segment(segment: &str) -> Option<Self> {
        let mut lines = segment.trim().lines();
        let heading = lines.next()?.trim();
        if heading.is_empty() {
            return None;
        }

        let severity = Severity::classify(heading);
        let title = clean_title(heading);
        let title = if title.is_empty() {
            severity.default_title().to_string()
        } else {
            title
        };
        let content = lines.map(str::trim).collect::<Vec<_>>().join("\n");

        Some(Self {
            title,
            content: content.trim().to_string(),
            severity,
        })
    }
}

fn clean_title(heading: &str) -> String {
    TITLE_PREFIX
        .replace(heading, "")
        .trim()
        .trim_end_matches(|c: char| c == ':' || c == '*')
        .trim()
        .to_string()
}

/// 将审查文本切分为有序段落
pub fn format_review(text: &str) -> Vec<ReviewSection> {
    let mut starts: Vec<usize> = std::iter::once(0)
        .chain(BOUNDARY.find_iter(text).map(|m| m.start()))
        .collect();
    starts.dedup();
    starts.push(text.len());

    starts
        .windows(2)
        .filter_map(|w| ReviewSection::from_segment(&text[w[0]..w[1]]))
        .collect()
}

// =========================================================
// 行内标记
// =========================================================

/// 段落正文中的行内片段，渲染为元素而非 HTML 字符串
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    Text(String),
    Strong(String),
    Emphasis(String),
    Code(String),
    LineBreak,
}

pub fn inline_spans(content: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    for (i, line) in content.lines().enumerate() {
        if i > 0 {
            spans.push(InlineSpan::LineBreak);
        }
        let mut cursor = 0;
        for caps in INLINE.captures_iter(line) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() > cursor {
                spans.push(InlineSpan::Text(line[cursor..whole.start()].to_string()));
            }
            let span = if let Some(m) = caps.get(1) {
                InlineSpan::Strong(m.as_str().to_string())
            } else if let Some(m) = caps.get(2) {
                InlineSpan::Emphasis(m.as_str().to_string())
            } else if let Some(m) = caps.get(3) {
                InlineSpan::Code(m.as_str().to_string())
            } else {
                InlineSpan::Text(whole.as_str().to_string())
            };
            spans.push(span);
            cursor = whole.end();
        }
        if cursor < line.len() {
            spans.push(InlineSpan::Text(line[cursor..].to_string()));
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn severities(text: &str) -> Vec<Severity> {
        format_review(text).iter().map(|s| s.severity).collect()
    }

    #[test]
    fn test_empty_text() {
        assert!(format_review("").is_empty());
        assert!(format_review("  \n\n ").is_empty());
    }

    #[test]
    fn test_cross_mark_is_critical() {
        let text = "Review of calculateSum\n❌ No input validation: a and b may not be numbers";
        let sections = format_review(text);
        assert!(sections.iter().any(|s| s.severity == Severity::Critical));
    }

    #[test]
    fn test_splits_on_markers_and_headers() {
        let text = "\
Overall the code is small.
### Issues
❌ Missing validation
The function accepts anything.
💡 Suggestion: use TypeScript
✅ Clear naming
1. Add tests
🔍 Complexity is O(1)";

        let sections = format_review(text);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Overall the code is small.",
                "Issues",
                "Missing validation",
                "Suggestion: use TypeScript",
                "Clear naming",
                "Add tests",
                "Complexity is O(1)",
            ]
        );
        assert_eq!(
            severities(text),
            vec![
                Severity::Info,
                Severity::Critical,
                Severity::Critical,
                Severity::Suggestion,
                Severity::Positive,
                Severity::Info,
                Severity::Info,
            ]
        );
        assert_eq!(sections[2].content, "The function accepts anything.");
    }

    #[test]
    fn test_keyword_prefix_boundary_is_case_insensitive() {
        let text = "Intro\nCRITICAL: SQL injection\nWarning: unbounded loop";
        assert_eq!(
            severities(text),
            vec![Severity::Info, Severity::Critical, Severity::Warning]
        );
    }

    #[test]
    fn test_precedence_first_match_wins() {
        assert_eq!(Severity::classify("✅ good, but ❌ bug"), Severity::Critical);
        assert_eq!(Severity::classify("Warning: positive side effect"), Severity::Warning);
        assert_eq!(Severity::classify("Positive: consider more"), Severity::Positive);
        assert_eq!(Severity::classify("💡 Idea"), Severity::Suggestion);
        assert_eq!(Severity::classify("Summary"), Severity::Info);
    }

    #[test]
    fn test_marker_only_heading_gets_default_title() {
        let sections = format_review("❌\nDivision by zero");
        assert_eq!(
            sections,
            vec![ReviewSection {
                title: "Critical Issue".to_string(),
                content: "Division by zero".to_string(),
                severity: Severity::Critical,
            }]
        );
    }

    #[test]
    fn test_markers_mid_line_do_not_split() {
        assert_eq!(format_review("Use ✅ and ❌ sparingly").len(), 1);
    }

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("**Security:**"), "Security");
        assert_eq!(clean_title("## 2. Performance"), "Performance");
        assert_eq!(clean_title("⚠️ Warning: shadowed variable"), "Warning: shadowed variable");
        assert_eq!(clean_title("10. Naming"), "Naming");
    }

    #[test]
    fn test_clean_title_keeps_leading_decimal() {
        assert_eq!(clean_title("3.14 precision loss"), "3.14 precision loss");
        assert_eq!(clean_title("- 2.5x slower loop"), "2.5x slower loop");
    }

    #[test]
    fn test_inline_spans() {
        let spans = inline_spans("Use **const** and `let`\nnot *var*");
        assert_eq!(
            spans,
            vec![
                InlineSpan::Text("Use ".into()),
                InlineSpan::Strong("const".into()),
                InlineSpan::Text(" and ".into()),
                InlineSpan::Code("let".into()),
                InlineSpan::LineBreak,
                InlineSpan::Text("not ".into()),
                InlineSpan::Emphasis("var".into()),
            ]
        );
    }
}
