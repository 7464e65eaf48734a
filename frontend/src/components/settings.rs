use crate::auth::{logout, use_api, use_auth};
use crate::components::icons::*;
use leptos::prelude::*;

#[component]
fn InfoRow(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between py-2 border-b border-base-300 last:border-0">
            <span class="text-sm text-base-content/70">{label}</span>
            <span class="font-mono text-sm">{value}</span>
        </div>
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let api_url = api.config().api_base_url.clone();
    let user = auth.user_signal();

    let on_logout = move |_: web_sys::MouseEvent| logout(auth, api.clone());

    view! {
        <div class="max-w-2xl mx-auto space-y-6">
            <div class="flex items-center gap-3">
                <Settings attr:class="h-7 w-7 text-primary" />
                <h1 class="text-3xl font-bold">"Settings"</h1>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="card-title gap-2">
                        <UserCircle attr:class="h-5 w-5" />
                        "Account"
                    </h3>
                    {move || user.get().map(|user| view! {
                        <InfoRow label="Username" value=user.username />
                        <InfoRow label="Email" value=user.email />
                        <InfoRow label="User ID" value=user.id />
                    })}
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="card-title">"Connection"</h3>
                    <InfoRow label="API Endpoint" value=api_url />
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body flex-row items-center justify-between">
                    <div>
                        <h3 class="font-semibold">"Sign Out"</h3>
                        <p class="text-sm text-base-content/70">"Remove the saved session from this browser."</p>
                    </div>
                    <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                        <LogOut attr:class="h-4 w-4" />
                        "Logout"
                    </button>
                </div>
            </div>
        </div>
    }
}
