//! Account Settings Page
//!
//! Account information and data export.

use leptos::*;
use leptos_router::*;

use crate::components::Header;
use crate::download::download_report;
use crate::state::global::GlobalState;

#[component]
pub fn AccountSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let signed_in = move || state.session.with(|s| s.is_authenticated());

    view! {
        <Show when=signed_in fallback=|| view! { <Redirect path="/" /> }>
            <Header />
            <main class="container mx-auto px-4 py-8 max-w-2xl space-y-6">
                <div class="flex items-center justify-between">
                    <h1 class="text-2xl font-bold">"Account Settings"</h1>
                    <A href="/" class="text-sm text-rose-600 dark:text-rose-400 hover:underline">"← Back"</A>
                </div>
                <AccountInfo />
                <DataManagement />
            </main>
        </Show>
    }
}

/// Read-only account details
#[component]
fn AccountInfo() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let user = state.user();

    let rows = user
        .map(|u| {
            vec![("Name", u.name), ("Email", u.email), ("User ID", u.id)]
        })
        .unwrap_or_default();

    view! {
        <section class="bg-white/80 dark:bg-slate-900/80 rounded-2xl shadow p-6">
            <h2 class="text-lg font-semibold mb-4">"Account Information"</h2>
            <dl class="space-y-3">
                {rows
                    .into_iter()
                    .map(|(label, value)| view! {
                        <div class="flex justify-between gap-4">
                            <dt class="text-slate-500">{label}</dt>
                            <dd class="font-medium truncate">{value}</dd>
                        </div>
                    })
                    .collect_view()}
            </dl>
            <A
                href="/profile"
                class="inline-block mt-6 text-sm text-rose-600 dark:text-rose-400 hover:underline"
            >
                "Edit profile settings →"
            </A>
        </section>
    }
}

/// Report export
#[component]
fn DataManagement() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let export = move |_: ev::MouseEvent| {
        let name = state.user().map(|u| u.name);
        match download_report(name.as_deref()) {
            Ok(file_name) => state.show_success(&format!("Downloaded {}", file_name)),
            Err(e) => state.show_error(&format!("Export failed: {:?}", e)),
        }
    };

    view! {
        <section class="bg-white/80 dark:bg-slate-900/80 rounded-2xl shadow p-6">
            <h2 class="text-lg font-semibold mb-2">"Your Data"</h2>
            <p class="text-sm text-slate-500 mb-4">
                "Download a JSON summary of your routine and analytics."
            </p>
            <button
                class="px-4 py-2 rounded-lg bg-gradient-to-r from-rose-500 to-pink-500 text-white font-medium"
                on:click=export
            >
                "📄 Export My Data"
            </button>
        </section>
    }
}
