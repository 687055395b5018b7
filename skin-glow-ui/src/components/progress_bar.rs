//! Progress Bar
//!
//! Percentage bar shared by the routine tracker and the progress charts.

use leptos::*;
use skin_glow::progress;

/// Horizontal bar filled to `percent` (clamped to 0-100)
#[component]
pub fn ProgressBar(
    #[prop(into)]
    percent: Signal<f64>,
    #[prop(default = "h-3")]
    height: &'static str,
    #[prop(default = "bg-gradient-to-r from-rose-400 to-pink-500")]
    fill: &'static str,
) -> impl IntoView {
    view! {
        <div class=format!("w-full {} bg-rose-100 dark:bg-slate-700 rounded-full overflow-hidden", height)>
            <div
                class=format!("h-full {} transition-all duration-500", fill)
                style:width=move || progress::width(percent.get())
            />
        </div>
    }
}
