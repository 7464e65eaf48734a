//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑，不依赖 DOM 或 web_sys。
//! 定义应用的所有路由及认证守卫规则。

use std::fmt::Display;

use crate::session::AuthGate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 落地页
    #[default]
    Home,
    Login,
    Register,
    /// 控制面板 (需要认证)
    Dashboard,
    /// 审查历史 (需要认证)
    History,
    /// 代码审查 (需要认证)
    Review,
    /// 账户设置 (需要认证)
    Settings,
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举，忽略查询串、片段与末尾斜杠
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        match path {
            "/" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/dashboard" => Self::Dashboard,
            "/dashboard/history" => Self::History,
            "/review" => Self::Review,
            "/settings" => Self::Settings,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::History => "/dashboard/history",
            Self::Review => "/review",
            Self::Settings => "/settings",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::History | Self::Review | Self::Settings
        )
    }

    /// 已认证用户是否应该离开此路由（登录/注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 守卫判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Render,
    Redirect(AppRoute),
    /// 会话检查尚未完成，暂不渲染也不跳转
    Wait,
}

/// 根据认证状态判定目标路由的去向
pub fn resolve(route: AppRoute, gate: AuthGate) -> RouteDecision {
    match gate {
        AuthGate::Pending if route.requires_auth() => RouteDecision::Wait,
        AuthGate::Anonymous if route.requires_auth() => {
            RouteDecision::Redirect(AppRoute::auth_failure_redirect())
        }
        AuthGate::Authenticated if route.should_redirect_when_authenticated() => {
            RouteDecision::Redirect(AppRoute::auth_success_redirect())
        }
        _ => RouteDecision::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [AppRoute; 8] = [
        AppRoute::Home,
        AppRoute::Login,
        AppRoute::Register,
        AppRoute::Dashboard,
        AppRoute::History,
        AppRoute::Review,
        AppRoute::Settings,
        AppRoute::NotFound,
    ];

    #[test]
    fn test_path_mapping() {
        for route in ALL.into_iter().filter(|r| *r != AppRoute::NotFound) {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/404"), AppRoute::NotFound);
    }

    #[test]
    fn test_from_path_normalizes() {
        assert_eq!(AppRoute::from_path(""), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/dashboard/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/review?x=1"), AppRoute::Review);
        assert_eq!(AppRoute::from_path("/settings#top"), AppRoute::Settings);
    }

    #[test]
    fn test_protected_routes() {
        let protected: Vec<AppRoute> = ALL.into_iter().filter(|r| r.requires_auth()).collect();
        assert_eq!(
            protected,
            vec![
                AppRoute::Dashboard,
                AppRoute::History,
                AppRoute::Review,
                AppRoute::Settings
            ]
        );
    }

    #[test]
    fn test_anonymous_is_sent_to_login() {
        assert_eq!(
            resolve(AppRoute::History, AuthGate::Anonymous),
            RouteDecision::Redirect(AppRoute::Login)
        );
        assert_eq!(resolve(AppRoute::Login, AuthGate::Anonymous), RouteDecision::Render);
        assert_eq!(resolve(AppRoute::Home, AuthGate::Anonymous), RouteDecision::Render);
    }

    #[test]
    fn test_authenticated_leaves_login_and_register() {
        for route in [AppRoute::Login, AppRoute::Register] {
            assert_eq!(
                resolve(route, AuthGate::Authenticated),
                RouteDecision::Redirect(AppRoute::Dashboard)
            );
        }
        assert_eq!(
            resolve(AppRoute::Settings, AuthGate::Authenticated),
            RouteDecision::Render
        );
    }

    #[test]
    fn test_pending_waits_only_on_protected_routes() {
        assert_eq!(resolve(AppRoute::Dashboard, AuthGate::Pending), RouteDecision::Wait);
        assert_eq!(resolve(AppRoute::Login, AuthGate::Pending), RouteDecision::Render);
        assert_eq!(resolve(AppRoute::NotFound, AuthGate::Pending), RouteDecision::Render);
    }
}
