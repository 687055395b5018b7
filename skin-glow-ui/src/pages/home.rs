//! Home Page
//!
//! Login screen when signed out, otherwise the tabbed dashboard.

use leptos::*;

use crate::components::{Header, LoginForm};
use crate::state::global::GlobalState;

use super::{ActivesTab, AnalysisTab, ProgressTab, RoutineTab};

/// Dashboard tabs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Routine,
    Actives,
    Analysis,
    Progress,
}

impl Tab {
    pub fn all() -> [Tab; 4] {
        [Tab::Routine, Tab::Actives, Tab::Analysis, Tab::Progress]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Routine => "My Routine",
            Tab::Actives => "Actives",
            Tab::Analysis => "Analysis",
            Tab::Progress => "Progress",
        }
    }
}

#[component]
pub fn Home() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let signed_in = move || state.session.with(|s| s.is_authenticated());

    view! {
        <Show when=signed_in fallback=|| view! { <LoginForm /> }>
            <Dashboard />
        </Show>
    }
}

#[component]
fn Dashboard() -> impl IntoView {
    let (tab, set_tab) = create_signal(Tab::default());

    view! {
        <Header />
        <main class="container mx-auto px-4 py-8 max-w-4xl">
            <nav class="flex gap-2 mb-6 overflow-x-auto">
                {Tab::all()
                    .into_iter()
                    .map(|t| view! {
                        <button
                            class=move || if tab.get() == t {
                                "px-4 py-2 rounded-lg font-medium whitespace-nowrap bg-gradient-to-r from-rose-500 to-pink-500 text-white"
                            } else {
                                "px-4 py-2 rounded-lg font-medium whitespace-nowrap bg-white/70 dark:bg-slate-800 text-slate-700 dark:text-slate-300 hover:bg-white"
                            }
                            on:click=move |_| set_tab.set(t)
                        >
                            {t.label()}
                        </button>
                    })
                    .collect_view()}
            </nav>

            {move || match tab.get() {
                Tab::Routine => view! { <RoutineTab /> }.into_view(),
                Tab::Actives => view! { <ActivesTab /> }.into_view(),
                Tab::Analysis => view! { <AnalysisTab /> }.into_view(),
                Tab::Progress => view! { <ProgressTab /> }.into_view(),
            }}
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabs_start_on_routine() {
        assert_eq!(Tab::default(), Tab::Routine);
        let labels: Vec<_> = Tab::all().iter().map(|t| t.label()).collect();
        assert_eq!(labels, ["My Routine", "Actives", "Analysis", "Progress"]);
    }
}
