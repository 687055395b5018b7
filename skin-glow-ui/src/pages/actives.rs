//! Actives Tab
//!
//! Active ingredients applied today. The list lives only for the page
//! session.

use leptos::*;
use skin_glow::actives::{Active, ActivesError, ActivesList};

use crate::state::global::GlobalState;

#[component]
pub fn ActivesTab() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let actives = create_rw_signal(ActivesList::default());
    let (show_form, set_show_form) = create_signal(false);
    let (name, set_name) = create_signal(String::new());
    let (kind, set_kind) = create_signal(String::new());
    let (concentration, set_concentration) = create_signal(String::new());

    let on_add = {
        let state = state.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            let now_ms = chrono::Utc::now().timestamp_millis();
            let outcome = actives
                .try_update(|list| {
                    list.add(&name.get(), &kind.get(), &concentration.get(), now_ms)
                        .map(|_| ())
                })
                .unwrap_or(Ok(()));
            match outcome {
                Ok(()) => {
                    set_name.set(String::new());
                    set_kind.set(String::new());
                    set_concentration.set(String::new());
                    set_show_form.set(false);
                }
                Err(e) => state.show_error(&e.to_string()),
            }
        }
    };

    let input_class = "w-full px-3 py-2 rounded-lg border border-rose-200 dark:border-slate-600 \
                       bg-white dark:bg-slate-800";

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-bold">"Active Ingredients"</h2>
                <span class="text-sm font-semibold text-rose-600 dark:text-rose-400">
                    {move || actives.with(|list| format!("{}/{} Applied", list.applied_count(), list.actives().len()))}
                </span>
            </div>

            <div class="grid gap-4 sm:grid-cols-2">
                {
                    let state = state.clone();
                    move || {
                        actives
                            .with(|list| list.actives().to_vec())
                            .into_iter()
                            .map(|active| view! { <ActiveCard active=active list=actives state=state.clone() /> })
                            .collect_view()
                    }
                }
            </div>

            <Show
                when=move || show_form.get()
                fallback=move || view! {
                    <button
                        class="w-full py-3 rounded-xl border-2 border-dashed border-rose-300 dark:border-slate-600 text-rose-600 dark:text-rose-400 font-medium"
                        on:click=move |_| set_show_form.set(true)
                    >
                        "+ Add Active"
                    </button>
                }
            >
                <form
                    on:submit=on_add.clone()
                    class="bg-white/80 dark:bg-slate-900/80 rounded-2xl shadow p-6 space-y-3"
                >
                    <input
                        type="text"
                        placeholder="Product Name"
                        class=input_class
                        prop:value=name
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                    <input
                        type="text"
                        placeholder="Type (e.g., Retinoid, AHA)"
                        class=input_class
                        prop:value=kind
                        on:input=move |ev| set_kind.set(event_target_value(&ev))
                    />
                    <input
                        type="text"
                        placeholder="Concentration %"
                        class=input_class
                        prop:value=concentration
                        on:input=move |ev| set_concentration.set(event_target_value(&ev))
                    />
                    <div class="flex gap-2">
                        <button
                            type="submit"
                            class="flex-1 py-2 rounded-lg bg-gradient-to-r from-rose-500 to-pink-500 text-white font-medium"
                        >
                            "Add"
                        </button>
                        <button
                            type="button"
                            class="flex-1 py-2 rounded-lg bg-slate-100 dark:bg-slate-800"
                            on:click=move |_| set_show_form.set(false)
                        >
                            "Cancel"
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}

#[component]
fn ActiveCard(active: Active, list: RwSignal<ActivesList>, state: GlobalState) -> impl IntoView {
    let id = active.id.clone();
    let on_toggle = move |_: ev::MouseEvent| {
        let outcome = list.try_update(|l| l.toggle(&id)).unwrap_or(Ok(false));
        if let Err(ActivesError::NotFound(id)) = outcome {
            state.show_error(&format!("Active not found: {}", id));
        }
    };

    let card_class = if active.applied_today {
        "text-left p-4 rounded-xl shadow bg-gradient-to-br from-rose-100 to-pink-100 dark:from-rose-900/40 dark:to-pink-900/40 ring-2 ring-rose-400"
    } else {
        "text-left p-4 rounded-xl shadow bg-white/80 dark:bg-slate-900/80 hover:ring-2 hover:ring-rose-200"
    };

    view! {
        <button class=card_class on:click=on_toggle>
            <div class="flex items-start justify-between">
                <div>
                    <h3 class="font-semibold text-slate-900 dark:text-white">{active.name}</h3>
                    <p class="text-xs text-slate-500">
                        {format!("{} · {}", active.kind, active.concentration)}
                    </p>
                </div>
                <span class="text-lg">{if active.applied_today { "✓" } else { "○" }}</span>
            </div>
            <div class="flex flex-wrap gap-1 mt-3">
                {active
                    .benefits
                    .into_iter()
                    .map(|b| view! {
                        <span class="text-xs px-2 py-0.5 rounded-full bg-rose-50 dark:bg-slate-800 text-rose-700 dark:text-rose-300">
                            {b}
                        </span>
                    })
                    .collect_view()}
            </div>
        </button>
    }
}
