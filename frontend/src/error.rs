use thiserror::Error;

// =========================================================
// 认证错误判定
// =========================================================

/// 出现在错误消息中即视为认证失败的关键字（区分大小写）
const AUTH_KEYWORDS: [&str; 3] = ["unauthorized", "token", "authentication"];

const STATUS_UNAUTHORIZED: u16 = 401;

/// 判断一个错误是否属于认证失败
///
/// 宁可误判也要清理会话：任何看起来像认证问题的错误都会触发强制登出。
pub fn is_auth_failure(status: Option<u16>, message: &str) -> bool {
    status == Some(STATUS_UNAUTHORIZED) || AUTH_KEYWORDS.iter().any(|kw| message.contains(kw))
}

// =========================================================
// 错误类型
// =========================================================

/// 请求与服务层的统一错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 传输层失败（无法连接、请求构建失败等）
    #[error("{0}")]
    Network(String),
    /// 非 2xx 响应，或响应不是 JSON
    #[error("{message}")]
    Server { status: u16, message: String },
    /// 认证失败，会话已被强制清理
    #[error("{message}")]
    Auth {
        status: Option<u16>,
        message: String,
    },
    /// 响应体无法解码为期望的类型
    #[error("Unexpected response: {0}")]
    Decode(String),
    /// 客户端校验失败，请求未发出
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Auth { status, .. } => *status,
            _ => None,
        }
    }

    /// 面向用户的错误消息
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth { .. })
    }

    /// 若错误看起来像认证失败，则升级为 `Auth`
    pub(crate) fn classify(self) -> Self {
        match self {
            ApiError::Validation(_) | ApiError::Auth { .. } => self,
            other => {
                let status = other.status();
                let message = other.message();
                if is_auth_failure(status, &message) {
                    ApiError::Auth { status, message }
                } else {
                    other
                }
            }
        }
    }
}

/// 在 Provider 作用域之外读取上下文
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0} must be used within its provider")]
pub struct ContextError(pub &'static str);
