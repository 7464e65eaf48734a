use crate::components::icons::*;
use crate::web::router::hard_navigate;
use leptos::prelude::*;

/// 顶层错误边界
///
/// 不区分错误类型："Try Again" 清空错误重新渲染，"Go Home" 整页跳转到首页。
#[component]
pub fn AppErrorBoundary(children: Children) -> impl IntoView {
    view! {
        <ErrorBoundary fallback=|errors| {
            let details = errors
                .get_untracked()
                .iter()
                .map(|(_, e)| e.to_string())
                .collect::<Vec<_>>();
            for detail in &details {
                log::error!("[View] Error caught by boundary: {}", detail);
            }

            let reset = errors.clone();
            view! {
                <div class="flex items-center justify-center min-h-[60vh] p-4">
                    <div class="max-w-md w-full text-center space-y-4">
                        <AlertTriangle attr:class="h-16 w-16 text-error mx-auto" />
                        <h2 class="text-2xl font-bold">"Something went wrong"</h2>
                        <p class="text-base-content/70">
                            "We encountered an error while loading this page. Please try refreshing."
                        </p>
                        <div class="flex flex-col items-center gap-2">
                            <button
                                class="btn btn-primary gap-2"
                                on:click=move |_| reset.set(Default::default())
                            >
                                <RefreshCw attr:class="h-4 w-4" />
                                "Try Again"
                            </button>
                            <button class="btn btn-ghost gap-2" on:click=|_| hard_navigate("/")>
                                <Home attr:class="h-4 w-4" />
                                "Go Home"
                            </button>
                        </div>
                        {cfg!(debug_assertions).then(|| view! {
                            <details class="text-left">
                                <summary class="cursor-pointer text-sm text-base-content/50">"Error details"</summary>
                                <pre class="text-xs mt-2 p-2 bg-base-200 rounded overflow-auto">
                                    {details.join("\n")}
                                </pre>
                            </details>
                        })}
                    </div>
                </div>
            }
        }>
            {children()}
        </ErrorBoundary>
    }
}
