//! 时间展示模块
//!
//! 服务端以 ISO 8601 / RFC 3339 字符串返回 `createdAt`，
//! 这里负责宽松解析并格式化为列表展示用的文本。

use chrono::{DateTime, NaiveDateTime, Utc};

const DISPLAY_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

/// 解析服务端时间字符串
///
/// 依次尝试 RFC 3339 和不带时区的 `YYYY-MM-DDTHH:MM:SS[.fff]`（按 UTC 处理）。
/// 返回 None 如果解析失败
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// 格式化为 `Mar 5, 2025, 10:30 AM`
pub fn format_timestamp(s: &str) -> Option<String> {
    parse_timestamp(s).map(|dt| dt.format(DISPLAY_FORMAT).to_string())
}

/// 列表展示：缺失或无法解析时显示占位文本
pub fn display_or_unknown(s: Option<&str>) -> String {
    s.and_then(format_timestamp)
        .unwrap_or_else(|| "Unknown date".to_string())
}
