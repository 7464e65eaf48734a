//! 会话状态机
//!
//! `SessionState` 是会话的唯一事实来源，只通过 `apply(SessionEvent)` 迁移：
//!
//! ```text
//! Unknown ──NoToken / RestoreFailed──▶ Anonymous
//! Unknown ──Restored(user)───────────▶ Authenticated
//! Unknown / Anonymous ──SignedIn(user)▶ Authenticated
//! * ──SignedOut / TornDown───────────▶ Anonymous
//! ```
//!
//! `SessionService` 执行每次迁移需要的 IO（Token 持久化、网络请求），
//! 并返回对应事件；响应式的 `AuthContext` 负责应用事件。两者分离使得
//! 状态机可以脱离 UI 单独测试。

#[cfg(test)]
mod tests;

use sentinel_shared::User;

use crate::api::{ApiClient, FetchTransport, LocalTokenStore, TokenStore, Transport};
use crate::error::ApiError;
use crate::services::AuthService;

// =========================================================
// 状态与事件
// =========================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// 启动时的初始状态，正在检查持久化 Token
    #[default]
    Unknown,
    Anonymous,
    Authenticated(User),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// 没有持久化 Token
    NoToken,
    /// 持久化 Token 换取到了用户信息
    Restored(User),
    /// 持久化 Token 无效，已清除
    RestoreFailed,
    /// 登录或注册成功，Token 已持久化
    SignedIn(User),
    SignedOut,
    /// 请求层检测到认证失败，Token 已清除
    TornDown,
}

/// 路由守卫看到的认证状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthGate {
    Pending,
    Anonymous,
    Authenticated,
}

impl SessionState {
    pub fn apply(&self, event: SessionEvent) -> SessionState {
        match (self, event) {
            (_, SessionEvent::SignedOut) | (_, SessionEvent::TornDown) => SessionState::Anonymous,
            (_, SessionEvent::SignedIn(user)) => SessionState::Authenticated(user),
            // 检查结果只对初始状态生效：检查期间用户已手动登录/登出时丢弃
            (SessionState::Unknown, SessionEvent::Restored(user)) => {
                SessionState::Authenticated(user)
            }
            (SessionState::Unknown, SessionEvent::NoToken)
            | (SessionState::Unknown, SessionEvent::RestoreFailed) => SessionState::Anonymous,
            (state, _) => state.clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn gate(&self) -> AuthGate {
        match self {
            SessionState::Unknown => AuthGate::Pending,
            SessionState::Anonymous => AuthGate::Anonymous,
            SessionState::Authenticated(_) => AuthGate::Authenticated,
        }
    }
}

// =========================================================
// 会话服务
// =========================================================

#[derive(Clone)]
pub struct SessionService<T = FetchTransport, S = LocalTokenStore> {
    auth: AuthService<T, S>,
}

impl<T: Transport, S: TokenStore> SessionService<T, S> {
    pub fn new(api: ApiClient<T, S>) -> Self {
        Self {
            auth: AuthService::new(api),
        }
    }

    /// 启动检查：用持久化 Token 换取用户信息
    ///
    /// 失败时只清除本次检查的 Token；检查期间用户重新登录写入的 Token 保留。
    pub async fn restore(&self) -> SessionEvent {
        let Some(token) = self.auth.token() else {
            return SessionEvent::NoToken;
        };

        match self.auth.get_profile().await {
            Ok(user) => {
                log::info!("[Auth] Session restored for {}", user.username);
                SessionEvent::Restored(user)
            }
            Err(e) => {
                log::error!("[Auth] Auth check failed: {}", e);
                self.auth.forget_token(&token);
                SessionEvent::RestoreFailed
            }
        }
    }

    /// 登录：成功时先持久化 Token，再返回携带用户的事件
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SessionEvent, ApiError> {
        let resp = self.auth.login(email, password).await?;
        self.auth.store_token(&resp.token);
        Ok(SessionEvent::SignedIn(resp.user))
    }

    pub async fn sign_up(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<SessionEvent, ApiError> {
        let resp = self.auth.register(username, email, password).await?;
        self.auth.store_token(&resp.token);
        Ok(SessionEvent::SignedIn(resp.user))
    }

    /// 登出总是成功
    pub fn sign_out(&self) -> SessionEvent {
        self.auth.logout();
        SessionEvent::SignedOut
    }
}
