use crate::auth::{register, use_api, use_auth};
use crate::cancel::ViewGuard;
use crate::components::icons::*;
use crate::components::login::{AuthField, FormError};
use crate::web::router::Link;
use leptos::prelude::*;

const MIN_PASSWORD_LEN: usize = 6;

/// 客户端校验，返回第一个错误
fn validate(username: &str, email: &str, password: &str, confirm: &str) -> Option<&'static str> {
    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        Some("Please fill in all fields")
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Some("Password must be at least 6 characters")
    } else if password != confirm {
        Some("Passwords do not match")
    } else {
        None
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let guard = ViewGuard::new();

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if let Some(msg) = validate(&username.get(), &email.get(), &password.get(), &confirm.get()) {
            set_error_msg.set(Some(msg.to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        guard.spawn(
            register(auth, api.clone(), username.get(), email.get(), password.get()),
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
                        <h1 class="text-3xl font-bold">"Create Account"</h1>
                        <p class="text-base-content/70">"Start reviewing your code with Sentinel"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <FormError message=error_msg />
                        <AuthField id="username" label="Username" input_type="text" placeholder="Choose a username" value=username />
                        <AuthField id="email" label="Email" input_type="email" placeholder="Enter your email" value=email />
                        <AuthField id="password" label="Password" input_type="password" placeholder="At least 6 characters" value=password />
                        <AuthField id="confirm" label="Confirm Password" input_type="password" placeholder="Repeat your password" value=confirm />
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating Account..." }.into_any()
                                } else {
                                    "Create Account".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm text-base-content/70">
                            "Already have an account? "
                            <Link to="/login" class="link link-primary">"Sign in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
