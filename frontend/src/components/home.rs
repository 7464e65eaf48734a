use crate::auth::use_auth;
use crate::components::icons::*;
use crate::web::router::Link;
use leptos::prelude::*;

#[component]
fn Feature(title: &'static str, description: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow hover:shadow-lg transition-shadow">
            <div class="card-body items-center text-center">
                <div class="text-primary">{children()}</div>
                <h3 class="card-title">{title}</h3>
                <p class="text-base-content/70">{description}</p>
            </div>
        </div>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = move || auth.state.with(|s| s.is_authenticated());

    view! {
        <div class="space-y-16">
            <section class="hero py-16">
                <div class="hero-content text-center">
                    <div class="max-w-3xl space-y-6">
                        <h1 class="text-4xl md:text-6xl font-bold">
                            "Ship with Confidence."
                            <span class="text-primary block">"Instant Code Audits."</span>
                        </h1>
                        <p class="text-xl text-base-content/70">
                            "Sentinel analyzes your code for critical vulnerabilities, performance bottlenecks, "
                            "and deviations from best practices, delivering actionable insights in seconds."
                        </p>
                        <div class="flex flex-col sm:flex-row gap-4 justify-center">
                            <Show
                                when=is_authenticated
                                fallback=|| view! {
                                    <Link to="/register" class="btn btn-primary btn-lg">"Create Your Free Account"</Link>
                                    <Link to="/login" class="btn btn-outline btn-lg">"Sign In"</Link>
                                }
                            >
                                <Link to="/review" class="btn btn-primary btn-lg">"Analyze New Code"</Link>
                            </Show>
                        </div>
                    </div>
                </div>
            </section>

            <section class="space-y-8">
                <div class="text-center">
                    <h2 class="text-3xl font-bold">"A More Intelligent Workflow"</h2>
                    <p class="text-base-content/70 mt-2">
                        "Go beyond linting. Integrate deep, contextual analysis into every stage of your development cycle."
                    </p>
                </div>
                <div class="grid md:grid-cols-2 lg:grid-cols-4 gap-6">
                    <Feature
                        title="Deep Static Analysis"
                        description="Uncover complex bugs, logical errors, and anti-patterns that traditional linters miss."
                    >
                        <Zap attr:class="h-8 w-8" />
                    </Feature>
                    <Feature
                        title="Vulnerability Detection"
                        description="Proactively identify security flaws before they reach production, with actionable mitigation advice."
                    >
                        <ShieldCheck attr:class="h-8 w-8" />
                    </Feature>
                    <Feature
                        title="Comprehensive Language Support"
                        description="Gain consistent, high-quality analysis across your entire tech stack, from Python to JavaScript and beyond."
                    >
                        <Code attr:class="h-8 w-8" />
                    </Feature>
                    <Feature
                        title="Actionable Intelligence"
                        description="Receive clear feedback with best-practice recommendations, transforming every review into a learning opportunity."
                    >
                        <Lightbulb attr:class="h-8 w-8" />
                    </Feature>
                </div>
            </section>

            <section class="hero bg-neutral text-neutral-content rounded-box py-12">
                <div class="hero-content text-center">
                    <div class="max-w-2xl space-y-4">
                        <h2 class="text-3xl font-bold">"Elevate Your Engineering Standards."</h2>
                        <p class="text-lg opacity-80">
                            "Stop shipping preventable errors. Integrate intelligent code analysis into your workflow."
                        </p>
                    </div>
                </div>
            </section>
        </div>
    }
}
