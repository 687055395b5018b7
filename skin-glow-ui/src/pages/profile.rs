//! Profile Settings Page
//!
//! Display name, background palette and notification preference. Edits stay
//! local to the form until "Save Settings" is pressed.

use gloo_timers::callback::Timeout;
use leptos::*;
use leptos_router::*;
use skin_glow::appearance::{theme_value, Palette, ProfileSettings};

use crate::components::Header;
use crate::state::global::GlobalState;

#[component]
pub fn Profile() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let signed_in = move || state.session.with(|s| s.is_authenticated());

    view! {
        <Show when=signed_in fallback=|| view! { <Redirect path="/" /> }>
            <Header />
            <main class="container mx-auto px-4 py-8 max-w-2xl">
                <ProfileForm />
            </main>
        </Show>
    }
}

#[component]
fn ProfileForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let user_name = state.user().map(|u| u.name).unwrap_or_default();
    let stored = state
        .appearance
        .with_untracked(|a| a.profile_settings())
        .with_display_name_fallback(&user_name);

    let (display_name, set_display_name) = create_signal(stored.display_name);
    let (background, set_background) = create_signal(stored.background);
    let (notifications, set_notifications) = create_signal(stored.notifications);
    let (saved, set_saved) = create_signal(false);

    let on_save = {
        let state = state.clone();
        move |_: ev::MouseEvent| {
            let settings = ProfileSettings {
                background: background.get(),
                theme: theme_value(state.is_dark()).to_string(),
                notifications: notifications.get(),
                display_name: display_name.get(),
            };
            match state.appearance.try_update(|a| a.save_profile(&settings)) {
                Some(Err(e)) => state.show_error(&format!("Failed to save settings: {}", e)),
                _ => {
                    set_saved.set(true);
                    Timeout::new(2000, move || set_saved.set(false)).forget();
                }
            }
        }
    };

    let on_logout = {
        let state = state.clone();
        move |_: ev::MouseEvent| state.logout()
    };

    let palette_buttons = Palette::all()
        .iter()
        .map(|palette| {
            let palette = *palette;
            let selected = move || background.get() == palette;
            let select = move |_: ev::MouseEvent| set_background.set(palette);
            view! {
                <button
                    class="flex flex-col items-center gap-2 p-3 rounded-xl border-2 border-transparent"
                    class:border-rose-500=selected
                    on:click=select
                >
                    <span class=format!("w-12 h-12 rounded-full bg-gradient-to-br {}", palette.swatch_gradient()) />
                    <span class="text-xs">{palette.label()}</span>
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="bg-white/80 dark:bg-slate-900/80 rounded-2xl shadow-lg p-6 space-y-8">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">"Profile Settings"</h1>
                <A href="/" class="text-sm text-rose-600 dark:text-rose-400 hover:underline">"← Back"</A>
            </div>

            <section>
                <label class="block text-sm font-medium mb-2">"Display Name"</label>
                <input
                    type="text"
                    class="w-full px-4 py-3 rounded-lg border border-rose-200 dark:border-slate-600 bg-white dark:bg-slate-800"
                    prop:value=display_name
                    on:input=move |ev| set_display_name.set(event_target_value(&ev))
                />
            </section>

            <section>
                <h2 class="text-sm font-medium mb-3">"Background Theme"</h2>
                <div class="grid grid-cols-4 gap-3">{palette_buttons}</div>
            </section>

            <section>
                <label class="flex items-center justify-between">
                    <span class="text-sm font-medium">"Notifications"</span>
                    <input
                        type="checkbox"
                        class="w-5 h-5 accent-rose-500"
                        prop:checked=notifications
                        on:change=move |ev| set_notifications.set(event_target_checked(&ev))
                    />
                </label>
            </section>

            <div class="flex gap-3">
                <button
                    class="flex-1 py-3 rounded-lg bg-gradient-to-r from-rose-500 to-pink-500 text-white font-semibold"
                    on:click=on_save
                >
                    {move || if saved.get() { "✓ Saved!" } else { "Save Settings" }}
                </button>
                <button
                    class="px-6 py-3 rounded-lg bg-red-50 dark:bg-red-900/30 text-red-600 font-semibold"
                    on:click=on_logout
                >
                    "Logout"
                </button>
            </div>
        </div>
    }
}
