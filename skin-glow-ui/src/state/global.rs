//! Global Application State
//!
//! Reactive state management using Leptos signals. Only the session and the
//! appearance are shared; each tab owns the rest of its state.

use leptos::*;
use skin_glow::appearance::{AppearanceStore, Palette};
use skin_glow::routine::Period;
use skin_glow::session::{SessionStore, User};

use super::storage::BrowserStorage;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Handle shared by every state container
    pub storage: BrowserStorage,
    /// Signed-in user
    pub session: RwSignal<SessionStore<BrowserStorage>>,
    /// Dark mode and background palette
    pub appearance: RwSignal<AppearanceStore<BrowserStorage>>,
    /// Half of the day reported by the header clock
    pub period: RwSignal<Period>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Whether the platform asks for a dark color scheme
fn prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let storage = BrowserStorage::new();

    let state = GlobalState {
        session: create_rw_signal(SessionStore::restore(storage.clone())),
        appearance: create_rw_signal(AppearanceStore::load(storage.clone(), prefers_dark())),
        period: create_rw_signal(skin_glow::clock::ClockReading::now().period()),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
        storage,
    };

    provide_context(state);
}

impl GlobalState {
    /// Currently signed-in user
    pub fn user(&self) -> Option<User> {
        self.session.with(|s| s.user().cloned())
    }

    pub fn is_dark(&self) -> bool {
        self.appearance.with(|a| a.is_dark())
    }

    pub fn background(&self) -> Palette {
        self.appearance.with(|a| a.background())
    }

    /// Flip dark mode
    pub fn toggle_dark(&self) {
        if let Some(Err(e)) = self.appearance.try_update(|a| a.toggle_dark()) {
            self.show_error(&format!("Failed to save theme: {}", e));
        }
    }

    /// Sign out
    pub fn logout(&self) {
        if let Some(Err(e)) = self.session.try_update(|s| s.logout()) {
            self.show_error(&e.to_string());
        }
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        web_sys::console::error_1(&message.into());
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
