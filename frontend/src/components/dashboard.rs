use crate::auth::{use_api, use_auth};
use crate::cancel::ViewGuard;
use crate::components::icons::*;
use crate::services::DashboardService;
use crate::web::router::Link;
use leptos::prelude::*;
use sentinel_shared::{Activity, DashboardStats};

/// 统计卡片
#[component]
fn StatCard(
    label: &'static str,
    value: String,
    change: String,
    /// 图标容器的配色
    tone: &'static str,
    children: Children,
) -> impl IntoView {
    let change_class = if change.contains('+') {
        "text-sm text-success"
    } else {
        "text-sm text-base-content/50"
    };

    view! {
        <div class="card bg-base-100 shadow hover:shadow-lg transition-shadow">
            <div class="card-body flex-row items-center justify-between">
                <div>
                    <p class="text-sm font-medium text-base-content/70">{label}</p>
                    <p class="text-2xl font-bold">{value}</p>
                    <p class=change_class>{change}</p>
                </div>
                <div class=format!("p-3 rounded-lg {}", tone)>{children()}</div>
            </div>
        </div>
    }
}

#[component]
fn ActivityItem(activity: Activity) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between p-3 border border-base-300 rounded-lg hover:bg-base-200 transition-colors">
            <div class="flex items-center gap-3">
                <div class="p-2 bg-primary/10 rounded text-primary">
                    <Code attr:class="h-4 w-4" />
                </div>
                <div>
                    <p class="text-sm font-medium">{activity.action}</p>
                    <div class="flex items-center gap-2 mt-1">
                        <span class="badge badge-info badge-sm capitalize">{activity.language}</span>
                        {activity.rating.map(|rating| view! {
                            <span class="flex items-center gap-1 text-xs text-base-content/70">
                                <Star attr:class="h-3 w-3 text-warning" />
                                {format!("{}/5", rating)}
                            </span>
                        })}
                    </div>
                </div>
            </div>
            <div class="text-right">
                <p class="text-sm text-base-content/50">{activity.time}</p>
                <span class="badge badge-success badge-sm">{activity.status}</span>
            </div>
        </div>
    }
}

fn dashboard_view(username: String, stats: DashboardStats) -> impl IntoView {
    let this_week = stats.reviews.this_week;
    let greeting = if this_week > 0 {
        format!("Great work! You've completed {} reviews this week.", this_week)
    } else {
        "Ready to improve your code with AI-powered reviews?".to_string()
    };
    let top_languages = stats
        .languages
        .list
        .iter()
        .take(3)
        .map(|lang| lang.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let distribution = stats.languages.list.iter().take(4).cloned().collect::<Vec<_>>();
    let recent = stats.recent_activity.clone();
    let quality = stats.quality.clone();
    let improvement = stats.reviews.improvement;

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">{format!("Welcome back, {}!", username)}</h1>
                <p class="text-base-content/70 mt-2">{greeting}</p>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                <StatCard
                    label="Reviews Completed"
                    value=stats.reviews.total.to_string()
                    change=format!("+{} this week", this_week)
                    tone="bg-info/10 text-info"
                >
                    <Code attr:class="h-6 w-6" />
                </StatCard>
                <StatCard
                    label="Code Quality Score"
                    value=format!("{}%", quality.score)
                    change=format!("+{}% improvement", quality.improvement)
                    tone="bg-success/10 text-success"
                >
                    <Star attr:class="h-6 w-6" />
                </StatCard>
                <StatCard
                    label="Languages Used"
                    value=stats.languages.count.to_string()
                    change=top_languages
                    tone="bg-secondary/10 text-secondary"
                >
                    <TrendingUp attr:class="h-6 w-6" />
                </StatCard>
            </div>

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-8">
                <div class="card bg-base-100 shadow">
                    <div class="card-body space-y-4">
                        <h3 class="card-title">"Quick Actions"</h3>
                        <Link to="/review" class="btn btn-primary w-full justify-between">
                            <span class="flex items-center gap-2">
                                <Code attr:class="h-5 w-5" />
                                "New Code Review"
                            </span>
                            <ChevronRight attr:class="h-4 w-4" />
                        </Link>
                        <div class="grid grid-cols-2 gap-4">
                            <Link to="/dashboard/history" class="btn btn-outline w-full">"View History"</Link>
                            <Link to="/settings" class="btn btn-outline w-full">"Settings"</Link>
                        </div>

                        <Show when={
                            let empty = distribution.is_empty();
                            move || !empty
                        }>
                            <div class="pt-4 border-t border-base-300">
                                <h4 class="text-sm font-medium mb-3">"Language Distribution"</h4>
                                <div class="space-y-2">
                                    {distribution
                                        .iter()
                                        .map(|lang| view! {
                                            <div class="flex items-center justify-between text-sm">
                                                <span class="capitalize text-base-content/70">{lang.name.clone()}</span>
                                                <span class="font-medium">{format!("{} reviews", lang.count)}</span>
                                            </div>
                                        })
                                        .collect_view()}
                                </div>
                            </div>
                        </Show>
                    </div>
                </div>

                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title">"Recent Activity"</h3>
                        {if recent.is_empty() {
                            view! {
                                <div class="text-center py-8 space-y-3">
                                    <Code attr:class="h-12 w-12 text-base-content/30 mx-auto" />
                                    <h3 class="text-lg font-medium">"No reviews yet"</h3>
                                    <p class="text-base-content/70">"Start your first code review to see activity here."</p>
                                    <Link to="/review" class="btn btn-outline">"Start Code Review"</Link>
                                </div>
                            }
                            .into_any()
                        } else {
                            view! {
                                <div class="space-y-4">
                                    {recent
                                        .into_iter()
                                        .map(|activity| view! { <ActivityItem activity=activity /> })
                                        .collect_view()}
                                </div>
                            }
                            .into_any()
                        }}
                    </div>
                </div>
            </div>

            {(this_week > 0).then(|| view! {
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title">"Weekly Progress"</h3>
                        <div class="flex items-center justify-between">
                            <div>
                                <p class="text-2xl font-bold">{format!("{} reviews", this_week)}</p>
                                <p class="text-success text-sm">{format!("+{}% from last week", improvement)}</p>
                            </div>
                            <div class="text-right">
                                <p class="text-sm text-base-content/70">"Quality Score"</p>
                                <p class="text-2xl font-bold">{format!("{}%", quality.score)}</p>
                                <p class="text-success text-sm">{format!("+{}% improvement", quality.improvement)}</p>
                            </div>
                        </div>
                        <progress class="progress progress-success w-full mt-4" value=quality.score.clamp(0.0, 100.0).to_string() max="100"></progress>
                    </div>
                </div>
            })}
        </div>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let service = DashboardService::new(use_api());
    let guard = ViewGuard::new();

    let (stats, set_stats) = signal(Option::<DashboardStats>::None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);

    let load_stats = move || {
        set_loading.set(true);
        set_error.set(None);
        let service = service.clone();
        guard.spawn(async move { service.get_stats().await }, move |result| {
            match result {
                Ok(data) => set_stats.set(Some(data)),
                Err(e) => {
                    log::error!("[View] Failed to fetch dashboard data: {}", e);
                    set_error.set(Some("Failed to load dashboard data. Please try again.".to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    // 挂载时加载，不做缓存
    load_stats();

    let username = move || {
        auth.state
            .with(|s| s.user().map(|u| u.username.clone()))
            .unwrap_or_default()
    };

    move || {
        if loading.get() {
            view! {
                <div class="flex flex-col items-center justify-center min-h-96 gap-4">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                    <p class="text-base-content/70">"Loading your dashboard..."</p>
                </div>
            }
            .into_any()
        } else if let Some(message) = error.get() {
            let retry = load_stats.clone();
            view! {
                <div class="flex flex-col items-center justify-center min-h-96 gap-4 text-center">
                    <AlertTriangle attr:class="h-12 w-12 text-error" />
                    <h3 class="text-lg font-medium">"Unable to load dashboard"</h3>
                    <p class="text-base-content/70">{message}</p>
                    <button class="btn btn-primary" on:click=move |_| retry()>"Try Again"</button>
                </div>
            }
            .into_any()
        } else {
            dashboard_view(username(), stats.get().unwrap_or_default()).into_any()
        }
    }
}
