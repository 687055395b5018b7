//! Header
//!
//! Brand, live clock and the profile menu.

use leptos::*;
use leptos_router::*;

use super::{Clock, ProfileDropdown};

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="bg-white/80 dark:bg-slate-900/80 backdrop-blur border-b border-rose-100 dark:border-slate-800 sticky top-0 z-30">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="flex items-center space-x-3">
                        <span class="w-9 h-9 rounded-full bg-gradient-to-br from-rose-400 to-pink-500 flex items-center justify-center text-white font-bold">
                            "S"
                        </span>
                        <span class="text-xl font-bold text-slate-900 dark:text-white">"Skin Glow"</span>
                    </A>

                    <div class="flex items-center space-x-4">
                        <Clock />
                        <ProfileDropdown />
                    </div>
                </div>
            </div>
        </header>
    }
}
