//! Sentinel 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `api`: HTTP 客户端（Token 注入、错误归一化、强制登出通知）
//! - `services`: 端点调用与响应形状归一化
//! - `session`: 会话状态机
//! - `auth`: 会话状态接入响应式系统
//! - `web::route` / `web::router`: 路由定义与路由服务
//! - `components`: UI 组件层

pub mod api;
mod auth;
pub mod cancel;
pub mod config;
pub mod error;
pub mod review_format;
pub mod services;
pub mod session;
mod components {
    pub mod dashboard;
    pub mod error_boundary;
    pub mod header;
    pub mod history;
    pub mod home;
    mod icons;
    pub mod login;
    pub mod register;
    pub mod review;
    pub mod settings;
}

use leptos::prelude::*;

use crate::api::BrowserApi;
use crate::auth::{AuthContext, init_auth, require_contexts};
use crate::components::dashboard::DashboardPage;
use crate::components::error_boundary::AppErrorBoundary;
use crate::components::header::Header;
use crate::components::history::ReviewHistoryPage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::components::review::ReviewPage;
use crate::components::settings::SettingsPage;
use crate::config::AppConfig;
use crate::session::SessionEvent;

// 原生 Web API 封装模块
// 对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，以减小 WASM 体积。
pub(crate) mod web {
    pub mod console;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::{HttpError, fetch_text};
    pub use storage::LocalStorage;
}

use web::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
///
/// 页面依赖的 Context 缺失时渲染为 `Err`，交给外层错误边界处理。
fn route_matcher(route: AppRoute) -> AnyView {
    if let Err(e) = require_contexts() {
        return view! { {Err::<(), _>(e)} }.into_any();
    }
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::History => view! { <ReviewHistoryPage /> }.into_any(),
        AppRoute::Review => view! { <ReviewPage /> }.into_any(),
        AppRoute::Settings => view! { <SettingsPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[60vh]">
                <div class="text-center space-y-4">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl">"Page not found"</p>
                    <Link to="/" class="btn btn-primary">"Back to Home"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 客户端在认证失败时只通知会话层，跳转由路由服务完成
    let config = AppConfig::from_env();
    web::console::init(config.log_level);
    let api = BrowserApi::browser(config).with_teardown(move || auth_ctx.apply(SessionEvent::TornDown));
    provide_context(api.clone());

    // 3. 启动检查
    init_auth(auth_ctx, api);

    // 4. 注入认证状态实现路由守卫
    let auth_gate = auth_ctx.gate_signal();

    view! {
        <Router auth_gate=auth_gate>
            <div class="min-h-screen bg-base-200 font-sans">
                <Header />
                <main class="max-w-7xl mx-auto p-4 md:p-8">
                    <AppErrorBoundary>
                        <RouterOutlet matcher=route_matcher />
                    </AppErrorBoundary>
                </main>
            </div>
        </Router>
    }
}
