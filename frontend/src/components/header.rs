use crate::auth::{logout, use_api, use_auth};
use crate::components::icons::*;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;

const NAV_ITEMS: [(AppRoute, &str); 3] = [
    (AppRoute::Dashboard, "Dashboard"),
    (AppRoute::Review, "Analyze"),
    (AppRoute::History, "History"),
];

#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();
    let user = auth.user_signal();

    // 登出后的跳转由路由服务处理
    let on_logout = move |_: web_sys::MouseEvent| logout(auth, api.clone());

    let nav_class = move |route: AppRoute| {
        if router.current_route().get() == route {
            "btn btn-ghost btn-sm btn-active"
        } else {
            "btn btn-ghost btn-sm"
        }
    };

    view! {
        <header class="navbar bg-base-100 shadow-sm px-4 md:px-8">
            <div class="flex-1 gap-2">
                <Link to="/" class="btn btn-ghost text-xl gap-2">
                    <ShieldCheck attr:class="h-6 w-6 text-primary" />
                    "Sentinel"
                </Link>
                <Show when=move || user.get().is_some()>
                    <nav class="hidden md:flex gap-1">
                        {NAV_ITEMS
                            .into_iter()
                            .map(move |(route, label)| {
                                view! {
                                    <a
                                        href=route.to_path()
                                        class=move || nav_class(route)
                                        on:click=move |ev: web_sys::MouseEvent| {
                                            ev.prevent_default();
                                            router.navigate(route.to_path());
                                        }
                                    >
                                        {label}
                                    </a>
                                }
                            })
                            .collect_view()}
                    </nav>
                </Show>
            </div>
            <div class="flex-none gap-2">
                {move || match user.get() {
                    Some(user) => view! {
                        <Link to="/settings" class="btn btn-ghost btn-sm gap-2">
                            <UserCircle attr:class="h-5 w-5" />
                            <span class="hidden sm:inline">{user.username}</span>
                        </Link>
                        <button on:click=on_logout.clone() class="btn btn-outline btn-error btn-sm gap-2">
                            <LogOut attr:class="h-4 w-4" />
                            "Logout"
                        </button>
                    }
                    .into_any(),
                    None => view! {
                        <Link to="/login" class="btn btn-ghost btn-sm">"Sign In"</Link>
                        <Link to="/register" class="btn btn-primary btn-sm">"Get Started"</Link>
                    }
                    .into_any(),
                }}
            </div>
        </header>
    }
}
