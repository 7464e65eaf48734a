//! 代码审查页面
//!
//! 结果只保存在当前视图的状态中，离开页面即丢弃。

mod form;
mod form_state;
mod result;

use leptos::prelude::*;
use sentinel_shared::ReviewResult;

pub use result::FormattedReview;

use form::CodeReviewForm;
use result::ReviewResultView;

#[component]
pub fn ReviewPage() -> impl IntoView {
    let review = RwSignal::new(Option::<ReviewResult>::None);

    move || match review.get() {
        None => view! {
            <CodeReviewForm on_complete=move |result: ReviewResult| review.set(Some(result)) />
        }
        .into_any(),
        Some(result) => view! {
            <ReviewResultView result=result on_new_review=move |_| review.set(None) />
        }
        .into_any(),
    }
}
