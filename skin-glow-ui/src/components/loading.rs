//! Loading Indicator

use leptos::*;

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block w-4 h-4 border-2 border-rose-500 border-t-transparent rounded-full animate-spin" />
    }
}
