//! Profile Dropdown
//!
//! Avatar button with account links, theme toggle, report download and
//! logout.

use leptos::*;
use leptos_router::*;

use crate::download::download_report;
use crate::state::global::GlobalState;

#[component]
pub fn ProfileDropdown() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (open, set_open) = create_signal(false);

    let user = {
        let state = state.clone();
        move || state.user()
    };
    let avatar = {
        let user = user.clone();
        move || user().map(|u| u.avatar_or_placeholder().to_string()).unwrap_or_default()
    };

    let toggle_theme = {
        let state = state.clone();
        move |_: ev::MouseEvent| {
            state.toggle_dark();
        }
    };

    let download = {
        let state = state.clone();
        move |_: ev::MouseEvent| {
            let name = state.user().map(|u| u.name);
            match download_report(name.as_deref()) {
                Ok(file_name) => state.show_success(&format!("Downloaded {}", file_name)),
                Err(e) => state.show_error(&format!("Download failed: {:?}", e)),
            }
        }
    };

    let logout = {
        let state = state.clone();
        move |_: ev::MouseEvent| {
            state.logout();
        }
    };

    let is_dark = {
        let state = state.clone();
        move || state.is_dark()
    };

    let item_class = "w-full text-left px-4 py-2 text-sm text-slate-700 dark:text-slate-200 \
                      hover:bg-rose-50 dark:hover:bg-slate-700 block";

    view! {
        <div class="relative">
            <button
                class="w-10 h-10 rounded-full overflow-hidden ring-2 ring-rose-300 dark:ring-rose-500"
                on:click=move |_| set_open.update(|v| *v = !*v)
            >
                <img src=avatar alt="Profile" class="w-full h-full object-cover" />
            </button>

            <Show when=move || open.get()>
                // Any click inside the menu closes it
                <div
                    class="absolute right-0 mt-2 w-56 bg-white dark:bg-slate-800 rounded-xl shadow-xl py-2 z-40"
                    on:click=move |_| set_open.set(false)
                >
                    <div class="px-4 py-2 border-b border-rose-100 dark:border-slate-700">
                        <p class="text-sm font-semibold text-slate-900 dark:text-white">
                            {let user = user.clone(); move || user().map(|u| u.name).unwrap_or_default()}
                        </p>
                        <p class="text-xs text-slate-500 truncate">
                            {let user = user.clone(); move || user().map(|u| u.email).unwrap_or_default()}
                        </p>
                    </div>

                    <A href="/settings" class=item_class>
                        "⚙️ Account Settings"
                    </A>
                    <button class=item_class on:click=toggle_theme.clone()>
                        {let is_dark = is_dark.clone(); move || if is_dark() { "☀️ Light Mode" } else { "🌙 Dark Mode" }}
                    </button>
                    <A href="/profile" class=item_class>
                        "🎨 Profile Settings"
                    </A>
                    <button class=item_class on:click=download.clone()>
                        "📄 Download Report"
                    </button>
                    <div class="border-t border-rose-100 dark:border-slate-700 mt-2 pt-2">
                        <button
                            class="w-full text-left px-4 py-2 text-sm text-red-600 hover:bg-red-50 dark:hover:bg-slate-700"
                            on:click=logout.clone()
                        >
                            "🚪 Logout"
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
