use crate::auth::{login, use_api, use_auth};
use crate::cancel::ViewGuard;
use crate::components::icons::*;
use crate::web::router::Link;
use leptos::prelude::*;

/// 登录/注册表单共用的输入框
#[component]
pub(crate) fn AuthField(
    id: &'static str,
    label: &'static str,
    input_type: &'static str,
    placeholder: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label" for=id>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type=input_type
                placeholder=placeholder
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=value
                class="input input-bordered"
                required
            />
        </div>
    }
}

/// 表单顶部的错误提示
#[component]
pub(crate) fn FormError(message: ReadSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div role="alert" class="alert alert-error text-sm py-2">
                <XCircle attr:class="h-5 w-5 shrink-0" />
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let guard = ViewGuard::new();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 登录成功后的跳转由路由服务根据认证状态完成
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().trim().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        guard.spawn(
            login(auth, api.clone(), email.get(), password.get()),
            move |result| {
                if let Err(e) = result {
                    set_error_msg.set(Some(e.message()));
                }
                set_is_submitting.set(false);
            },
        );
    };

    view! {
        <div class="hero min-h-[70vh]">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Welcome Back"</h1>
                        <p class="text-base-content/70">"Sign in to continue to Sentinel"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <FormError message=error_msg />
                        <AuthField id="email" label="Email" input_type="email" placeholder="Enter your email" value=email />
                        <AuthField id="password" label="Password" input_type="password" placeholder="Enter your password" value=password />
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing In..." }.into_any()
                                } else {
                                    "Sign In".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm text-base-content/70">
                            "Don't have an account? "
                            <Link to="/register" class="link link-primary">"Sign up"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
