use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

pub mod date;
pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// LocalStorage 中保存 Bearer Token 的键，也是客户端唯一的持久化状态
pub const TOKEN_STORAGE_KEY: &str = "token";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

// =========================================================
// 语言 (Languages)
// =========================================================

/// 支持审查的编程语言
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    JavaScript,
    Python,
    Java,
    TypeScript,
    Cpp,
    CSharp,
    Php,
    Ruby,
    Go,
    Rust,
}

impl Language {
    /// 用于下拉框等 UI 展示的名称
    pub fn label(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::TypeScript => "TypeScript",
            Language::Cpp => "C++",
            Language::CSharp => "C#",
            Language::Php => "PHP",
            Language::Ruby => "Ruby",
            Language::Go => "Go",
            Language::Rust => "Rust",
        }
    }

    pub fn all() -> impl Iterator<Item = Language> {
        Language::iter()
    }
}

/// 历史记录的语言过滤条件
///
/// `All` 在查询串中编码为 `language=all`，由服务端解释为"不过滤"。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageFilter {
    #[default]
    All,
    Only(Language),
}

impl LanguageFilter {
    pub const ALL: &'static str = "all";

    pub fn as_str(&self) -> &str {
        match self {
            LanguageFilter::All => Self::ALL,
            LanguageFilter::Only(lang) => lang.as_ref(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LanguageFilter::All => "All Languages",
            LanguageFilter::Only(lang) => lang.label(),
        }
    }

    /// `All` 在前，其余按 `Language` 声明顺序
    pub fn options() -> impl Iterator<Item = LanguageFilter> {
        std::iter::once(LanguageFilter::All).chain(Language::iter().map(LanguageFilter::Only))
    }
}

impl fmt::Display for LanguageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageFilter {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::ALL {
            Ok(LanguageFilter::All)
        } else {
            Language::from_str(s).map(LanguageFilter::Only)
        }
    }
}

impl Serialize for LanguageFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LanguageFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =========================================================
// 用户与认证 (Users & Auth)
// =========================================================

/// 服务端返回的用户记录
///
/// 客户端视其为不可变值：每次认证成功后整体替换，从不逐字段修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    /// 服务端定义的其它字段，原样保留
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 登录 / 注册成功时服务端原子地返回 token 与用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: User,
}

// =========================================================
// 代码审查 (Reviews)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub code: String,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub review: String,
}

/// 当前视图持有的审查结果，离开页面即丢弃
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewResult {
    pub review_text: String,
    pub code: String,
    pub language: Language,
}

// =========================================================
// 历史记录 (History)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(rename = "review", alias = "reviewText", default)]
    pub review_text: String,
    #[serde(default)]
    pub rating: Option<f32>,
    /// ISO 8601 字符串，展示时由 [`date::format_timestamp`] 解析
    #[serde(default)]
    pub created_at: Option<String>,
    /// 审查耗时（秒）
    #[serde(default)]
    pub review_time: Option<f64>,
}

impl ReviewRecord {
    /// 列表中使用的摘要，最多 `max_chars` 个字符
    pub fn excerpt(&self, max_chars: usize) -> Option<String> {
        if self.review_text.is_empty() {
            return None;
        }
        let mut chars = self.review_text.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            Some(format!("{}...", head))
        } else {
            Some(head)
        }
    }
}

/// 分页信息，服务端可能返回空对象 `{}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl Pagination {
    pub fn total_pages(&self) -> u32 {
        self.pages.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryPage {
    #[serde(default)]
    pub suggestions: Vec<ReviewRecord>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl HistoryPage {
    /// 空历史是合法状态：`{suggestions: [], pagination: {}}`
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }
}

/// 历史查询条件，序列化为查询串 `page=..&limit=..&language=..`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFilters {
    pub page: u32,
    pub limit: u32,
    pub language: LanguageFilter,
}

impl Default for HistoryFilters {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            language: LanguageFilter::All,
        }
    }
}

impl HistoryFilters {
    pub fn to_query(&self) -> String {
        // 字段均为数字或受限枚举，编码不会失败
        serde_urlencoded::to_string(self).unwrap_or_default()
    }

    /// 修改语言过滤时回到第一页
    pub fn with_language(self, language: LanguageFilter) -> Self {
        Self {
            language,
            page: 1,
            ..self
        }
    }

    pub fn previous_page(self) -> Self {
        Self {
            page: self.page.saturating_sub(1).max(1),
            ..self
        }
    }

    pub fn next_page(self, total_pages: u32) -> Self {
        Self {
            page: (self.page + 1).min(total_pages.max(1)),
            ..self
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self, total_pages: u32) -> bool {
        self.page < total_pages
    }
}

// =========================================================
// 控制面板统计 (Dashboard)
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub reviews: ReviewStats,
    pub quality: QualityStats,
    pub languages: LanguageStats,
    pub recent_activity: Vec<Activity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewStats {
    pub total: u64,
    pub this_week: u64,
    pub improvement: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualityStats {
    pub score: f64,
    pub improvement: f64,
    pub average_rating: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageStats {
    pub count: u64,
    pub list: Vec<LanguageCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    pub action: String,
    pub language: String,
    pub rating: Option<f32>,
    pub time: String,
    pub status: String,
}

// =========================================================
// 响应信封 (Envelope)
// =========================================================

/// 服务端可能返回 `{data: {...}}` 或直接返回对象，统一为同一形状
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(inner) => inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_language_wire_names() {
        assert_eq!(serde_json::to_value(Language::CSharp).unwrap(), json!("csharp"));
        assert_eq!(Language::from_str("javascript").unwrap(), Language::JavaScript);
        assert_eq!(Language::all().count(), 10);
    }

    #[test]
    fn test_language_filter_parse() {
        assert_eq!("all".parse::<LanguageFilter>().unwrap(), LanguageFilter::All);
        assert_eq!(
            "rust".parse::<LanguageFilter>().unwrap(),
            LanguageFilter::Only(Language::Rust)
        );
        assert!("cobol".parse::<LanguageFilter>().is_err());
        assert_eq!(LanguageFilter::options().count(), 11);
    }

    #[test]
    fn test_user_keeps_server_fields() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1",
            "username": "alice",
            "email": "alice@x.com",
            "plan": "pro"
        }))
        .unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.extra.get("plan"), Some(&json!("pro")));
    }

    #[test]
    fn test_review_record_from_server() {
        let record: ReviewRecord = serde_json::from_value(json!({
            "_id": "r1",
            "language": "python",
            "review": "Looks fine",
            "rating": 4,
            "createdAt": "2025-03-05T10:30:00Z",
            "reviewTime": 2.5
        }))
        .unwrap();
        assert_eq!(record.id, "r1");
        assert_eq!(record.review_text, "Looks fine");
        assert_eq!(record.rating, Some(4.0));
        assert_eq!(record.review_time, Some(2.5));
    }

    #[test]
    fn test_review_record_excerpt() {
        let mut record: ReviewRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(record.excerpt(5), None);
        record.review_text = "abcdefgh".to_string();
        assert_eq!(record.excerpt(5).as_deref(), Some("abcde..."));
        assert_eq!(record.excerpt(20).as_deref(), Some("abcdefgh"));
    }

    #[test]
    fn test_empty_pagination_serializes_as_empty_object() {
        assert_eq!(serde_json::to_value(HistoryPage::empty()).unwrap(), json!({
            "suggestions": [],
            "pagination": {}
        }));
    }

    #[test]
    fn test_history_filters_query() {
        let filters = HistoryFilters::default();
        assert_eq!(filters.to_query(), "page=1&limit=10&language=all");

        let filters = HistoryFilters {
            page: 2,
            limit: 10,
            language: LanguageFilter::Only(Language::TypeScript),
        };
        assert_eq!(filters.to_query(), "page=2&limit=10&language=typescript");
    }

    #[test]
    fn test_history_filters_paging() {
        let filters = HistoryFilters::default();
        assert!(!filters.has_previous());
        assert_eq!(filters.previous_page().page, 1);

        let next = filters.next_page(3);
        assert_eq!(next.page, 2);
        assert_eq!(next.next_page(3).next_page(3).page, 3);
        assert!(!next.next_page(3).has_next(3));

        let reset = next.with_language(LanguageFilter::Only(Language::Java));
        assert_eq!(reset.page, 1);
        assert_eq!(reset.limit, 10);
    }

    #[test]
    fn test_envelope_accepts_both_shapes() {
        let wrapped: Envelope<DashboardStats> =
            serde_json::from_value(json!({"data": {"reviews": {"total": 3}}})).unwrap();
        assert_eq!(wrapped.into_inner().reviews.total, 3);

        let bare: Envelope<DashboardStats> =
            serde_json::from_value(json!({"reviews": {"total": 5, "thisWeek": 2}})).unwrap();
        let stats = bare.into_inner();
        assert_eq!(stats.reviews.total, 5);
        assert_eq!(stats.reviews.this_week, 2);
    }

    #[test]
    fn test_dashboard_stats_defaults() {
        let stats: DashboardStats = serde_json::from_value(json!({
            "languages": {"count": 1, "list": [{"name": "rust", "count": 4}]},
            "recentActivity": [{"_id": "a1", "action": "Code review", "rating": 5}]
        }))
        .unwrap();
        assert_eq!(stats.reviews, ReviewStats::default());
        assert_eq!(stats.languages.list[0].count, 4);
        assert_eq!(stats.recent_activity[0].id.as_deref(), Some("a1"));
        assert_eq!(stats.recent_activity[0].status, "");
    }
}
