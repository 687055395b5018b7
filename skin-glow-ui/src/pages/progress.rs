//! Progress Tab
//!
//! Overview cards, per-sample skin scores, weekly completion and insights.

use leptos::*;
use skin_glow::progress::{
    improvement_label, Metric, INSIGHTS, SKIN_SAMPLES, WEEKLY_COMPLETION,
};

use crate::components::ProgressBar;

fn metric_fill(metric: Metric) -> &'static str {
    match metric {
        Metric::Hydration => "bg-blue-400",
        Metric::Clarity => "bg-emerald-400",
        Metric::Radiance => "bg-amber-400",
        Metric::Texture => "bg-purple-400",
    }
}

#[component]
pub fn ProgressTab() -> impl IntoView {
    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold">"Your Progress"</h2>

            // Overview
            <div class="grid grid-cols-2 sm:grid-cols-4 gap-3">
                {Metric::all()
                    .iter()
                    .map(|metric| view! {
                        <div class="p-4 rounded-xl bg-white/80 dark:bg-slate-900/80 shadow text-center">
                            <p class="text-2xl font-bold text-green-600 dark:text-green-400">
                                {improvement_label(*metric)}
                            </p>
                            <p class="text-xs text-slate-500 mt-1">{metric.label()}</p>
                        </div>
                    })
                    .collect_view()}
            </div>

            // Skin scores
            <section class="bg-white/80 dark:bg-slate-900/80 rounded-2xl shadow p-6">
                <h3 class="font-semibold mb-4">"Skin Health Over Time"</h3>
                <div class="space-y-5">
                    {SKIN_SAMPLES
                        .iter()
                        .map(|sample| view! {
                            <div>
                                <p class="text-sm font-medium mb-2">{sample.day}</p>
                                <div class="space-y-1">
                                    {Metric::all()
                                        .iter()
                                        .map(|metric| {
                                            let value = metric.value(sample);
                                            view! {
                                                <div class="flex items-center gap-2">
                                                    <span class="w-20 text-xs text-slate-500">{metric.label()}</span>
                                                    <ProgressBar
                                                        percent=Signal::derive(move || f64::from(value))
                                                        height="h-2"
                                                        fill=metric_fill(*metric)
                                                    />
                                                    <span class="w-8 text-xs text-right">{value}</span>
                                                </div>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            </div>
                        })
                        .collect_view()}
                </div>
            </section>

            // Routine completion
            <section class="bg-white/80 dark:bg-slate-900/80 rounded-2xl shadow p-6">
                <h3 class="font-semibold mb-4">"Routine Completion"</h3>
                <div class="space-y-3">
                    {WEEKLY_COMPLETION
                        .iter()
                        .map(|week| {
                            let completion = week.completion;
                            view! {
                                <div class="flex items-center gap-3">
                                    <span class="w-16 text-sm">{week.week}</span>
                                    <ProgressBar percent=Signal::derive(move || f64::from(completion)) />
                                    <span class="w-10 text-sm text-right">{format!("{}%", completion)}</span>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </section>

            // Insights
            <section class="bg-gradient-to-br from-rose-100 to-pink-100 dark:from-rose-900/30 dark:to-pink-900/30 rounded-2xl p-6">
                <h3 class="font-semibold mb-3">"💡 Insights"</h3>
                <ul class="space-y-2">
                    {INSIGHTS
                        .iter()
                        .map(|insight| view! { <li class="text-sm">{*insight}</li> })
                        .collect_view()}
                </ul>
            </section>
        </div>
    }
}
