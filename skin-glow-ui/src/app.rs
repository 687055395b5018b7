//! App Root Component
//!
//! Routing, global state and the themed page background.

use leptos::*;
use leptos_router::*;

use crate::components::Toast;
use crate::pages::{AccountSettings, Home, Profile};
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Mirror dark mode onto <html> so `dark:` variants apply everywhere
    let dark = {
        let state = state.clone();
        move || state.is_dark()
    };
    create_effect(move |_| {
        let is_dark = dark();
        if let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            if let Err(e) = root.class_list().toggle_with_force("dark", is_dark) {
                web_sys::console::warn_1(&e);
            }
        }
    });

    let background = move || {
        format!(
            "min-h-screen bg-gradient-to-br {} text-slate-900 dark:text-white transition-colors",
            state.background().page_gradient()
        )
    };

    view! {
        <Router>
            <div class=background>
                <Routes>
                    <Route path="/" view=Home />
                    <Route path="/profile" view=Profile />
                    <Route path="/settings" view=AccountSettings />
                    <Route path="/*any" view=NotFound />
                </Routes>

                <Toast />
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-slate-500 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-gradient-to-r from-rose-500 to-pink-500 text-white rounded-lg font-medium"
            >
                "Back to My Routine"
            </A>
        </div>
    }
}
