//! 代码审查请求表单
//!
//! 语言选择、示例填充、代码编辑与提交；错误在表单内联展示，由用户手动重试。

use leptos::prelude::*;
use sentinel_shared::{Language, ReviewResult};

use super::form_state::FormState;
use crate::auth::use_api;
use crate::cancel::ViewGuard;
use crate::components::icons::*;
use crate::services::ReviewService;

/// 带窗口装饰的代码输入区
#[component]
fn CodeEditor(state: FormState) -> impl IntoView {
    view! {
        <div class="border border-base-300 rounded-lg overflow-hidden">
            <div class="flex items-center justify-between px-4 py-2 bg-base-200 border-b border-base-300">
                <span class="text-sm font-medium">{move || state.language.get().label()}</span>
                <div class="flex gap-1">
                    <div class="w-3 h-3 bg-error rounded-full"></div>
                    <div class="w-3 h-3 bg-warning rounded-full"></div>
                    <div class="w-3 h-3 bg-success rounded-full"></div>
                </div>
            </div>
            <textarea
                class="w-full h-96 p-4 font-mono text-sm bg-base-100 resize-none focus:outline-none"
                placeholder="Paste your code here or click 'Load Sample' to try with example code..."
                spellcheck="false"
                on:input=move |ev| state.code.set(event_target_value(&ev))
                prop:value=move || state.code.get()
            ></textarea>
        </div>
    }
}

#[component]
pub fn CodeReviewForm(#[prop(into)] on_complete: Callback<ReviewResult>) -> impl IntoView {
    let service = ReviewService::new(use_api());
    let guard = ViewGuard::new();
    let state = FormState::new();

    let (loading, set_loading) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_loading.set(true);
        set_error_msg.set(None);

        let service = service.clone();
        let code = state.code.get();
        let language = state.language.get();
        guard.spawn(
            async move { service.submit(&code, language).await },
            move |result| {
                set_loading.set(false);
                match result {
                    Ok(review) => on_complete.run(review),
                    Err(e) => set_error_msg.set(Some(e.message())),
                }
            },
        );
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">"Code Review Request"</h2>
                <p class="text-sm text-base-content/70">
                    "Paste your code below and get AI-powered review suggestions"
                </p>

                <form class="space-y-4 mt-4" on:submit=on_submit>
                    <Show when=move || error_msg.with(Option::is_some)>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <XCircle attr:class="h-5 w-5 shrink-0" />
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="flex flex-col sm:flex-row sm:items-end sm:justify-between gap-4">
                        <div class="form-control flex-1">
                            <label class="label" for="language">
                                <span class="label-text">"Programming Language"</span>
                            </label>
                            <select
                                id="language"
                                class="select select-bordered w-full"
                                on:change=move |ev| {
                                    if let Ok(language) = event_target_value(&ev).parse::<Language>() {
                                        state.language.set(language);
                                    }
                                }
                                prop:value=move || state.language.get().as_ref().to_string()
                            >
                                {Language::all()
                                    .map(|lang| view! { <option value=lang.as_ref().to_string()>{lang.label()}</option> })
                                    .collect_view()}
                            </select>
                        </div>

                        <div class="flex gap-2">
                            <button type="button" class="btn btn-outline btn-sm" on:click=move |_| state.load_sample()>
                                "Load Sample"
                            </button>
                            <button type="button" class="btn btn-outline btn-error btn-sm" on:click=move |_| state.clear()>
                                "Clear"
                            </button>
                        </div>
                    </div>

                    <CodeEditor state=state />

                    <div class="flex justify-end">
                        <button
                            type="submit"
                            class="btn btn-primary"
                            disabled=move || loading.get() || state.is_blank()
                        >
                            {move || if loading.get() {
                                view! { <span class="loading loading-spinner"></span> "Analyzing Code..." }.into_any()
                            } else {
                                "Get Code Review".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
