//! 路由服务模块 - 核心引擎
//!
//! 封装 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 导航流程："请求 -> 守卫(resolve) -> 处理 -> 加载"。
//! 认证状态通过注入的 `Signal<AuthGate>` 获得，路由不依赖认证模块的实现。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, RouteDecision, resolve};
use crate::session::AuthGate;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 地址栏写入方式：重定向用 Replace，避免后退键回到被拒绝的页面
#[derive(Clone, Copy)]
enum HistoryWrite {
    Push,
    Replace,
}

fn write_history(path: &str, mode: HistoryWrite) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = match mode {
        HistoryWrite::Push => history.push_state_with_url(&JsValue::NULL, "", Some(path)),
        HistoryWrite::Replace => history.replace_state_with_url(&JsValue::NULL, "", Some(path)),
    };
    if let Err(e) = result {
        log::warn!("[Router] Failed to update history for {}: {:?}", path, e);
    }
}

/// 整页跳转，丢弃所有内存状态
pub fn hard_navigate(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(path) {
            log::error!("[Router] Hard navigation failed: {:?}", e);
        }
    }
}

#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// 认证状态（注入的信号）
    auth_gate: Signal<AuthGate>,
}

impl RouterService {
    fn new(auth_gate: Signal<AuthGate>) -> Self {
        let (current_route, set_route) = signal(AppRoute::from_path(&current_path()));
        Self {
            current_route,
            set_route,
            auth_gate,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    pub fn auth_gate(&self) -> Signal<AuthGate> {
        self.auth_gate
    }

    /// 守卫判定后切换路由
    ///
    /// `on_render` 为 None 表示地址栏已经是目标路径（popstate）。
    /// Wait 时照常切换，出口组件显示加载状态，会话确定后由 Effect 处理。
    fn settle(&self, target: AppRoute, path: &str, on_render: Option<HistoryWrite>) {
        match resolve(target, self.auth_gate.get_untracked()) {
            RouteDecision::Redirect(redirect) => {
                log::info!("[Router] Access to {} denied, redirecting to {}", target, redirect);
                let mode = on_render.unwrap_or(HistoryWrite::Replace);
                write_history(redirect.to_path(), mode);
                self.set_route.set(redirect);
            }
            RouteDecision::Render | RouteDecision::Wait => {
                if let Some(mode) = on_render {
                    write_history(path, mode);
                }
                self.set_route.set(target);
            }
        }
    }

    /// 导航到指定路径，经过认证守卫
    pub fn navigate(&self, path: &str) {
        self.settle(AppRoute::from_path(path), path, Some(HistoryWrite::Push));
    }

    /// 浏览器后退/前进按钮同样经过守卫
    fn init_popstate_listener(&self) {
        let router = *self;
        let closure = Closure::<dyn Fn()>::new(move || {
            let path = current_path();
            router.settle(AppRoute::from_path(&path), &path, None);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 监听器与页面同寿命
        closure.forget();
    }

    /// 认证状态或路由变化时重新判定
    ///
    /// 登出、强制登出与启动检查结束都通过这里完成跳转。
    fn setup_auth_redirect(&self) {
        let RouterService {
            current_route,
            set_route,
            auth_gate,
        } = *self;

        Effect::new(move |_| {
            let gate = auth_gate.get();
            let route = current_route.get();

            if let RouteDecision::Redirect(redirect) = resolve(route, gate) {
                log::info!(
                    "[Router] Auth state is {:?}, redirecting {} -> {}",
                    gate,
                    route,
                    redirect
                );
                write_history(redirect.to_path(), HistoryWrite::Replace);
                set_route.set(redirect);
            }
        });
    }
}

fn provide_router(auth_gate: Signal<AuthGate>) -> RouterService {
    let router = RouterService::new(auth_gate);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(auth_gate: Signal<AuthGate>, children: Children) -> impl IntoView {
    provide_router(auth_gate);

    children()
}

/// 路由出口组件
///
/// 根据当前路由与认证状态渲染视图；会话检查未完成时显示加载状态。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let route = router.current_route().get();
        match resolve(route, router.auth_gate().get()) {
            RouteDecision::Render => matcher(route),
            RouteDecision::Wait | RouteDecision::Redirect(_) => view! {
                <div class="flex items-center justify-center min-h-[60vh]">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any(),
        }
    }
}

/// 应用内链接，拦截点击改为 History 导航
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
