use crate::auth::use_api;
use crate::cancel::{LatestOnly, ViewGuard};
use crate::components::icons::*;
use crate::components::review::FormattedReview;
use crate::services::DashboardService;
use crate::web::router::Link;
use leptos::prelude::*;
use sentinel_shared::date::display_or_unknown;
use sentinel_shared::{HistoryFilters, HistoryPage, LanguageFilter, ReviewRecord};

const EXCERPT_CHARS: usize = 200;

#[component]
fn ReviewCard(record: ReviewRecord) -> impl IntoView {
    let (expanded, set_expanded) = signal(false);
    let excerpt = record
        .excerpt(EXCERPT_CHARS)
        .unwrap_or_else(|| "No review content available".to_string());
    let language = record.language.clone().unwrap_or_else(|| "unknown".to_string());
    let created = display_or_unknown(record.created_at.as_deref());
    let full_text = record.review_text.clone();

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <div class="flex flex-col lg:flex-row lg:items-center lg:justify-between gap-4">
                    <div class="flex-1">
                        <div class="flex items-center gap-3 mb-2">
                            <Code attr:class="h-5 w-5 text-primary" />
                            <h3 class="text-lg font-semibold">"Code Review"</h3>
                            <span class="badge badge-info capitalize">{language}</span>
                            {record.rating.map(|rating| view! {
                                <span class="flex items-center gap-1 text-sm text-base-content/70">
                                    <Star attr:class="h-4 w-4 text-warning" />
                                    {format!("{}/5", rating)}
                                </span>
                            })}
                        </div>
                        <p class="text-sm text-base-content/70 mb-2 line-clamp-2">{excerpt}</p>
                        <div class="flex items-center gap-4 text-sm text-base-content/50">
                            <span class="flex items-center gap-1">
                                <Clock attr:class="h-4 w-4" />
                                {created}
                            </span>
                            {record.review_time.map(|secs| view! { <span>{format!("Duration: {}s", secs)}</span> })}
                        </div>
                    </div>
                    <button class="btn btn-primary btn-sm" on:click=move |_| set_expanded.update(|v| *v = !*v)>
                        {move || if expanded.get() { "Hide Details" } else { "View Details" }}
                    </button>
                </div>
                <Show when=move || expanded.get()>
                    <div class="mt-4 pt-4 border-t border-base-300">
                        <FormattedReview text=full_text.clone() />
                    </div>
                </Show>
            </div>
        </div>
    }
}

/// 空历史提示
fn empty_message(filter: LanguageFilter) -> String {
    match filter {
        LanguageFilter::All => "You haven't completed any code reviews yet.".to_string(),
        LanguageFilter::Only(lang) => {
            format!("No {} reviews found. Try changing your filters.", lang)
        }
    }
}

#[component]
pub fn ReviewHistoryPage() -> impl IntoView {
    let service = DashboardService::new(use_api());
    let guard = ViewGuard::new();
    let latest = LatestOnly::new();

    let filters = RwSignal::new(HistoryFilters::default());
    let (page, set_page) = signal(HistoryPage::empty());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);

    let load = move |current: HistoryFilters| {
        set_loading.set(true);
        set_error.set(None);
        let service = service.clone();
        let fetch = async move { service.get_history(current).await };
        guard.spawn_latest(&latest, fetch, move |result| {
            match result {
                Ok(data) => set_page.set(data),
                Err(e) => {
                    log::error!("[View] Failed to fetch review history: {}", e);
                    set_error.set(Some("Failed to load review history. Please try again.".to_string()));
                    set_page.set(HistoryPage::empty());
                }
            }
            set_loading.set(false);
        });
    };

    // 过滤条件变化时重新加载（包括首次挂载）
    Effect::new({
        let load = load.clone();
        move |_| load(filters.get())
    });

    let refresh = {
        let load = load.clone();
        move |_: web_sys::MouseEvent| load(filters.get_untracked())
    };
    let retry = move |_: web_sys::MouseEvent| load(filters.get_untracked());

    let total_pages = move || page.with(|p| p.pagination.total_pages());

    view! {
        <div class="space-y-6">
            <div class="flex items-center gap-4">
                <Link to="/dashboard" class="btn btn-ghost btn-sm gap-2">
                    <ChevronLeft attr:class="h-4 w-4" />
                    "Back to Dashboard"
                </Link>
                <div>
                    <h1 class="text-3xl font-bold">"Review History"</h1>
                    <p class="text-base-content/70 mt-1">"Your past code reviews and analyses"</p>
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body flex-col sm:flex-row sm:items-center gap-4 p-4">
                    <label class="text-sm font-medium" for="language-filter">"Language:"</label>
                    <select
                        id="language-filter"
                        class="select select-bordered"
                        on:change=move |ev| {
                            if let Ok(language) = event_target_value(&ev).parse::<LanguageFilter>() {
                                filters.update(|f| *f = f.with_language(language));
                            }
                        }
                        prop:value=move || filters.get().language.to_string()
                    >
                        {LanguageFilter::options()
                            .map(|opt| view! { <option value=opt.to_string()>{opt.label()}</option> })
                            .collect_view()}
                    </select>
                    <div class="flex-1"></div>
                    <button class="btn btn-outline gap-2" on:click=refresh disabled=move || loading.get()>
                        <RefreshCw attr:class=move || if loading.get() { "h-4 w-4 animate-spin" } else { "h-4 w-4" } />
                        "Refresh"
                    </button>
                </div>
            </div>

            {move || {
                if loading.get() {
                    return view! {
                        <div class="flex flex-col items-center justify-center min-h-64 gap-4">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                            <p class="text-base-content/70">"Loading review history..."</p>
                        </div>
                    }
                    .into_any();
                }

                if let Some(message) = error.get() {
                    let retry = retry.clone();
                    return view! {
                        <div role="alert" class="alert alert-error flex-col">
                            <span>{message}</span>
                            <button class="btn btn-sm" on:click=retry>"Try Again"</button>
                        </div>
                    }
                    .into_any();
                }

                if page.with(HistoryPage::is_empty) {
                    return view! {
                        <div class="card bg-base-100 shadow">
                            <div class="card-body items-center text-center py-12">
                                <Code attr:class="h-16 w-16 text-base-content/30" />
                                <h3 class="text-lg font-medium">"No reviews found"</h3>
                                <p class="text-base-content/70">{empty_message(filters.get().language)}</p>
                                <Link to="/review" class="btn btn-primary mt-4">"Start Your First Review"</Link>
                            </div>
                        </div>
                    }
                    .into_any();
                }

                view! {
                    <div class="space-y-4">
                        {page
                            .get()
                            .suggestions
                            .into_iter()
                            .map(|record| view! { <ReviewCard record=record /> })
                            .collect_view()}
                    </div>
                }
                .into_any()
            }}

            <Show when=move || { !loading.get() && total_pages() > 1 }>
                <div class="flex justify-center items-center gap-4">
                    <button
                        class="btn btn-outline btn-sm"
                        disabled=move || !filters.get().has_previous()
                        on:click=move |_| filters.update(|f| *f = f.previous_page())
                    >
                        <ChevronLeft attr:class="h-4 w-4" />
                        "Previous"
                    </button>
                    <span class="text-sm text-base-content/70">
                        {move || format!("Page {} of {}", filters.get().page, total_pages())}
                    </span>
                    <button
                        class="btn btn-outline btn-sm"
                        disabled=move || !filters.get().has_next(total_pages())
                        on:click=move |_| filters.update(|f| *f = f.next_page(total_pages()))
                    >
                        "Next"
                        <ChevronRight attr:class="h-4 w-4" />
                    </button>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_shared::Language;

    #[test]
    fn test_empty_message() {
        assert_eq!(
            empty_message(LanguageFilter::All),
            "You haven't completed any code reviews yet."
        );
        assert_eq!(
            empty_message(LanguageFilter::Only(Language::Python)),
            "No python reviews found. Try changing your filters."
        );
    }
}
