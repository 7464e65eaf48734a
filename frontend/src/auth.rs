//! 认证模块
//!
//! 把会话状态机接入响应式系统，与路由系统解耦：
//! 路由服务通过注入的 `Signal<AuthGate>` 读取认证状态。
//! `AuthContext` 是 `SessionState` 的唯一写入者。

use leptos::prelude::*;
use leptos::task::spawn_local;
use sentinel_shared::User;

use crate::api::BrowserApi;
use crate::error::{ApiError, ContextError};
use crate::session::{AuthGate, SessionEvent, SessionService, SessionState};

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<SessionState>,
    set_state: WriteSignal<SessionState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::default());
        Self { state, set_state }
    }

    /// 应用会话事件，所有状态变化都经过这里
    pub fn apply(&self, event: SessionEvent) {
        log::debug!("[Auth] Applying {:?}", event);
        self.set_state.update(|state| *state = state.apply(event));
    }

    /// 认证状态信号（用于路由服务注入）
    pub fn gate_signal(&self) -> Signal<AuthGate> {
        let state = self.state;
        Signal::derive(move || state.with(SessionState::gate))
    }

    pub fn user_signal(&self) -> Signal<Option<User>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user().cloned()))
    }
}

/// 从 Context 获取认证上下文
pub fn try_use_auth() -> Result<AuthContext, ContextError> {
    use_context::<AuthContext>().ok_or(ContextError("AuthContext"))
}

/// 在 Provider 之外使用属于配置错误，直接失败
pub fn use_auth() -> AuthContext {
    try_use_auth().unwrap_or_else(|e| panic!("{}", e))
}

pub fn try_use_api() -> Result<BrowserApi, ContextError> {
    use_context::<BrowserApi>().ok_or(ContextError("BrowserApi"))
}

/// 从 Context 获取已注册强制登出监听的客户端
pub fn use_api() -> BrowserApi {
    try_use_api().unwrap_or_else(|e| panic!("{}", e))
}

/// 页面渲染前确认依赖的 Context 均已提供
pub fn require_contexts() -> Result<(), ContextError> {
    try_use_auth()?;
    try_use_api()?;
    Ok(())
}

/// 启动检查：用持久化 Token 恢复会话
pub fn init_auth(ctx: AuthContext, api: BrowserApi) {
    let service = SessionService::new(api);
    spawn_local(async move {
        let event = service.restore().await;
        ctx.apply(event);
    });
}

/// 登录成功后 Token 与用户同时生效，路由服务自动跳转
pub async fn login(
    ctx: AuthContext,
    api: BrowserApi,
    email: String,
    password: String,
) -> Result<(), ApiError> {
    let event = SessionService::new(api).sign_in(&email, &password).await?;
    ctx.apply(event);
    Ok(())
}

pub async fn register(
    ctx: AuthContext,
    api: BrowserApi,
    username: String,
    email: String,
    password: String,
) -> Result<(), ApiError> {
    let event = SessionService::new(api)
        .sign_up(&username, &email, &password)
        .await?;
    ctx.apply(event);
    Ok(())
}

/// 注销并清除状态
///
/// 导航由路由服务的认证状态监听自动处理。
pub fn logout(ctx: AuthContext, api: BrowserApi) {
    let event = SessionService::new(api).sign_out();
    ctx.apply(event);
}
