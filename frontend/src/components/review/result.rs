//! 审查结果展示
//!
//! 正文经 `format_review` 切分为带严重级别的卡片，行内标记渲染为元素。

use leptos::prelude::*;
use sentinel_shared::ReviewResult;

use crate::components::icons::*;
use crate::review_format::{InlineSpan, ReviewSection, Severity, format_review, inline_spans};

fn render_span(span: InlineSpan) -> AnyView {
    match span {
        InlineSpan::Text(text) => text.into_any(),
        InlineSpan::Strong(text) => view! { <strong>{text}</strong> }.into_any(),
        InlineSpan::Emphasis(text) => view! { <em>{text}</em> }.into_any(),
        InlineSpan::Code(text) => {
            view! { <code class="bg-base-200 px-1 py-0.5 rounded text-sm">{text}</code> }.into_any()
        }
        InlineSpan::LineBreak => view! { <br /> }.into_any(),
    }
}

fn severity_icon(severity: Severity, class: &'static str) -> AnyView {
    match severity {
        Severity::Critical => view! { <XCircle attr:class=class /> }.into_any(),
        Severity::Warning => view! { <AlertTriangle attr:class=class /> }.into_any(),
        Severity::Positive => view! { <CheckCircle attr:class=class /> }.into_any(),
        Severity::Suggestion => view! { <Lightbulb attr:class=class /> }.into_any(),
        Severity::Info => view! { <Info attr:class=class /> }.into_any(),
    }
}

#[component]
fn SectionCard(section: ReviewSection) -> impl IntoView {
    let (border, bg, icon) = section.severity.palette();
    let spans = inline_spans(&section.content);

    view! {
        <div class=format!("border rounded-lg p-4 {} {}", border, bg)>
            <div class="flex items-start gap-3">
                <div class=format!("shrink-0 mt-0.5 {}", icon)>
                    {severity_icon(section.severity, "h-5 w-5")}
                </div>
                <div class="flex-1 min-w-0">
                    <h4 class="font-semibold mb-2">{section.title}</h4>
                    <div class="text-sm leading-relaxed">
                        {spans.into_iter().map(render_span).collect_view()}
                    </div>
                </div>
            </div>
        </div>
    }
}

/// 格式化后的审查正文，历史详情复用
#[component]
pub fn FormattedReview(#[prop(into)] text: String) -> impl IntoView {
    let sections = format_review(&text);
    if sections.is_empty() {
        return view! { <p class="text-base-content/50">"No review content available"</p> }.into_any();
    }

    view! {
        <div class="space-y-4">
            {sections
                .into_iter()
                .map(|section| view! { <SectionCard section=section /> })
                .collect_view()}
        </div>
    }
    .into_any()
}

#[component]
pub fn ReviewResultView(result: ReviewResult, #[prop(into)] on_new_review: Callback<()>) -> impl IntoView {
    view! {
        <div class="space-y-6">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <div class="flex items-center justify-between">
                        <h2 class="card-title">"Code Review Results"</h2>
                        <button class="btn btn-primary btn-sm" on:click=move |_| on_new_review.run(())>
                            "New Review"
                        </button>
                    </div>
                    <p class="text-sm text-base-content/70">
                        {format!("AI-powered analysis of your {} code", result.language.label())}
                    </p>
                    <div class="mt-4">
                        <FormattedReview text=result.review_text />
                    </div>
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="card-title">"Original Code"</h3>
                    <pre class="bg-neutral text-neutral-content p-4 rounded-lg overflow-x-auto text-sm">
                        <code>{result.code}</code>
                    </pre>
                </div>
            </div>
        </div>
    }
}
