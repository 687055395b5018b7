//! Login / Signup Form
//!
//! Simulated authentication: any non-empty credentials succeed after a short
//! delay.

use gloo_timers::future::TimeoutFuture;
use leptos::*;
use skin_glow::session::{validate_login, validate_signup, DEFAULT_AUTH_LATENCY};

use crate::state::global::GlobalState;

#[component]
pub fn LoginForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (is_login, set_is_login) = create_signal(true);
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (name, set_name) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (loading, set_loading) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);

        let (email, password, name) = (email.get(), password.get(), name.get());
        let login = is_login.get();
        let checked = if login {
            validate_login(&email, &password)
        } else {
            validate_signup(&email, &name, &password)
        };
        if let Err(e) = checked {
            set_error.set(Some(e.to_string()));
            return;
        }

        set_loading.set(true);
        let state = state.clone();
        spawn_local(async move {
            TimeoutFuture::new(DEFAULT_AUTH_LATENCY.as_millis() as u32).await;

            let outcome = state.session.try_update(|s| {
                if login {
                    s.login(&email, &password).map(|u| u.name.clone())
                } else {
                    s.signup(&email, &name, &password).map(|u| u.name.clone())
                }
            });

            match outcome {
                Some(Ok(user_name)) => {
                    if !login {
                        let seeded = state.appearance.try_update(|a| {
                            let settings = a.profile_settings().with_display_name_fallback(&user_name);
                            a.save_profile(&settings)
                        });
                        if let Some(Err(e)) = seeded {
                            web_sys::console::warn_1(
                                &format!("Failed to seed profile settings: {}", e).into(),
                            );
                        }
                    }
                    state.show_success(&format!("Welcome, {}!", user_name));
                }
                Some(Err(e)) => set_error.set(Some(e.to_string())),
                None => {}
            }
            set_loading.set(false);
        });
    };

    let input_class = "w-full px-4 py-3 rounded-lg border border-rose-200 dark:border-slate-600 \
                       bg-white dark:bg-slate-800 text-slate-900 dark:text-white \
                       focus:ring-2 focus:ring-rose-400 focus:border-transparent";

    view! {
        <div class="min-h-screen flex items-center justify-center px-4">
            <div class="w-full max-w-md bg-white/90 dark:bg-slate-900/90 rounded-2xl shadow-xl p-8">
                <div class="text-center mb-8">
                    <div class="w-16 h-16 rounded-full bg-gradient-to-br from-rose-400 to-pink-500 mx-auto mb-4 flex items-center justify-center text-white text-2xl font-bold">
                        "S"
                    </div>
                    <h1 class="text-2xl font-bold text-slate-900 dark:text-white">
                        {move || if is_login.get() { "Welcome Back" } else { "Create Account" }}
                    </h1>
                    <p class="text-slate-600 dark:text-slate-400 mt-1">"Your personal skincare companion"</p>
                </div>

                <form on:submit=on_submit class="space-y-4">
                    <Show when=move || !is_login.get()>
                        <input
                            type="text"
                            placeholder="Full Name"
                            class=input_class
                            prop:value=name
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                        />
                    </Show>
                    <input
                        type="email"
                        placeholder="Email"
                        class=input_class
                        prop:value=email
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        class=input_class
                        prop:value=password
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />

                    {move || error.get().map(|msg| view! {
                        <p class="text-sm text-red-600 dark:text-red-400">{msg}</p>
                    })}

                    <button
                        type="submit"
                        disabled=loading
                        class="w-full py-3 rounded-lg bg-gradient-to-r from-rose-500 to-pink-500 text-white font-semibold disabled:opacity-50"
                    >
                        {move || match (loading.get(), is_login.get()) {
                            (true, _) => "Loading...",
                            (false, true) => "Sign In",
                            (false, false) => "Sign Up",
                        }}
                    </button>
                </form>

                <p class="text-center text-sm text-slate-600 dark:text-slate-400 mt-6">
                    {move || if is_login.get() { "Don't have an account? " } else { "Already have an account? " }}
                    <button
                        class="text-rose-600 dark:text-rose-400 font-semibold hover:underline"
                        on:click=move |_| {
                            set_is_login.update(|v| *v = !*v);
                            set_error.set(None);
                        }
                    >
                        {move || if is_login.get() { "Sign Up" } else { "Sign In" }}
                    </button>
                </p>

                <p class="text-center text-xs text-slate-500 mt-4">
                    "Demo: Use any email and password to get started"
                </p>
            </div>
        </div>
    }
}
