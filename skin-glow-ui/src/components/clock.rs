//! Real-time Clock
//!
//! Ticks every second and publishes AM/PM changes to the global state.

use gloo_timers::callback::Interval;
use leptos::*;
use skin_glow::clock::{ClockReading, PeriodTracker};

use crate::state::global::GlobalState;

#[component]
pub fn Clock() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (reading, set_reading) = create_signal(ClockReading::now());
    let tracker = store_value(PeriodTracker::new());

    // Seed the tracker so only real changes are published
    tracker.update_value(|t| {
        t.observe(&reading.get_untracked());
    });

    let period = state.period;
    let interval = Interval::new(1000, move || {
        let now = ClockReading::now();
        set_reading.set(now);
        if let Some(changed) = tracker.try_update_value(|t| t.observe(&now)).flatten() {
            period.set(changed);
        }
    });
    let interval = store_value(Some(interval));
    on_cleanup(move || interval.set_value(None));

    view! {
        <div class="flex items-center gap-2 px-3 py-2 rounded-lg bg-rose-50 dark:bg-slate-800">
            <span class="text-lg">{move || if reading.get().period().is_am() { "🌅" } else { "🌙" }}</span>
            <span class="font-mono text-sm font-semibold text-slate-900 dark:text-white">
                {move || reading.get().display()}
            </span>
            <span class="text-xs font-bold text-rose-600 dark:text-rose-400">
                {move || reading.get().period().to_string()}
            </span>
        </div>
    }
}
