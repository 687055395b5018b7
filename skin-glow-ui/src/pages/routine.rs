//! Routine Tab
//!
//! Checklist for the current AM/PM period with an edit mode for adding,
//! removing and resetting steps.

use leptos::*;
use skin_glow::routine::{RoutineEditor, RoutineError, RoutineStep, DEFAULT_STEP_DURATION};

use crate::components::ProgressBar;
use crate::state::global::GlobalState;
use crate::state::BrowserStorage;

#[component]
pub fn RoutineTab() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let period = state.period;

    let editor = create_rw_signal(RoutineEditor::load(
        state.storage.clone(),
        period.get_untracked(),
    ));

    // Follow the header clock across AM/PM
    create_effect(move |_| {
        let current = period.get();
        editor.update(|e| e.switch_period(current));
    });

    let (editing, set_editing) = create_signal(false);
    let (new_name, set_new_name) = create_signal(String::new());
    let (new_duration, set_new_duration) = create_signal(DEFAULT_STEP_DURATION.to_string());

    let report = {
        let state = state.clone();
        move |result: Result<(), RoutineError>| {
            if let Err(e) = result {
                state.show_error(&e.to_string());
            }
        }
    };

    let on_add = {
        let report = report.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            let outcome = editor
                .try_update(|e| e.add_step(&new_name.get(), &new_duration.get()).map(|_| ()))
                .unwrap_or(Ok(()));
            match outcome {
                Ok(()) => {
                    set_new_name.set(String::new());
                    set_new_duration.set(DEFAULT_STEP_DURATION.to_string());
                }
                // A blank name just leaves the form as it is
                Err(RoutineError::BlankName) => {}
                Err(e) => report(Err(e)),
            }
        }
    };

    let on_reset = {
        let report = report.clone();
        move |_: ev::MouseEvent| report(editor.try_update(|e| e.reset_routine()).unwrap_or(Ok(())))
    };

    let progress = Signal::derive(move || editor.with(|e| e.progress()));

    view! {
        <div class="bg-white/80 dark:bg-slate-900/80 rounded-2xl shadow-lg p-6">
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-2xl font-bold">
                    {move || format!("{} Routine", editor.with(|e| e.period().title()))}
                </h2>
                <span class="text-sm font-semibold text-rose-600 dark:text-rose-400">
                    {move || {
                        let p = progress.get();
                        format!("{}/{} Steps", p.completed, p.total)
                    }}
                </span>
            </div>

            <ProgressBar percent=Signal::derive(move || progress.get().percent()) />

            <ul class="mt-6 space-y-3">
                {
                    let report = report.clone();
                    move || {
                        editor
                            .with(|e| e.steps().to_vec())
                            .into_iter()
                            .map(|step| view! {
                                <StepRow step=step editor=editor editing=editing report=report.clone() />
                            })
                            .collect_view()
                    }
                }
            </ul>

            <Show when=move || progress.get().is_complete()>
                <p class="mt-6 text-center text-lg font-semibold text-green-600 dark:text-green-400">
                    "✓ Completed!"
                </p>
            </Show>

            <div class="mt-6 space-y-4">
                <button
                    class="w-full py-2 rounded-lg border border-rose-300 dark:border-slate-600 text-rose-600 dark:text-rose-400 font-medium hover:bg-rose-50 dark:hover:bg-slate-800"
                    on:click=move |_| set_editing.update(|v| *v = !*v)
                >
                    {move || if editing.get() { "Done Editing" } else { "✎ Customize Routine" }}
                </button>

                <Show when=move || editing.get()>
                    <form on:submit=on_add.clone() class="flex flex-col sm:flex-row gap-2">
                        <input
                            type="text"
                            placeholder="Step name"
                            class="flex-1 px-3 py-2 rounded-lg border border-rose-200 dark:border-slate-600 bg-white dark:bg-slate-800"
                            prop:value=new_name
                            on:input=move |ev| set_new_name.set(event_target_value(&ev))
                        />
                        <input
                            type="text"
                            placeholder="Duration"
                            class="sm:w-28 px-3 py-2 rounded-lg border border-rose-200 dark:border-slate-600 bg-white dark:bg-slate-800"
                            prop:value=new_duration
                            on:input=move |ev| set_new_duration.set(event_target_value(&ev))
                        />
                        <button
                            type="submit"
                            class="px-4 py-2 rounded-lg bg-gradient-to-r from-rose-500 to-pink-500 text-white font-medium"
                        >
                            "Add Step"
                        </button>
                    </form>
                    <button
                        class="w-full py-2 rounded-lg text-sm text-slate-500 hover:text-red-600"
                        on:click=on_reset.clone()
                    >
                        "Reset to Default"
                    </button>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn StepRow<F>(
    step: RoutineStep,
    editor: RwSignal<RoutineEditor<BrowserStorage>>,
    editing: ReadSignal<bool>,
    report: F,
) -> impl IntoView
where
    F: Fn(Result<(), RoutineError>) + Clone + 'static,
{
    let toggle_id = step.id.clone();
    let delete_id = step.id.clone();
    let on_toggle = {
        let report = report.clone();
        move |_: ev::MouseEvent| {
            report(
                editor
                    .try_update(|e| e.toggle_step(&toggle_id).map(|_| ()))
                    .unwrap_or(Ok(())),
            )
        }
    };
    let on_delete = move |_: ev::MouseEvent| {
        report(
            editor
                .try_update(|e| e.delete_step(&delete_id).map(|_| ()))
                .unwrap_or(Ok(())),
        )
    };

    let row_class = if step.completed {
        "flex items-center gap-3 p-3 rounded-lg bg-green-50 dark:bg-green-900/20"
    } else {
        "flex items-center gap-3 p-3 rounded-lg bg-rose-50/60 dark:bg-slate-800"
    };
    let check_class = if step.completed {
        "w-6 h-6 rounded-full flex items-center justify-center bg-green-500 text-white text-sm"
    } else {
        "w-6 h-6 rounded-full border-2 border-rose-300 dark:border-slate-500"
    };
    let name_class = if step.completed {
        "flex-1 line-through text-slate-400"
    } else {
        "flex-1 text-slate-800 dark:text-slate-100"
    };

    view! {
        <li class=row_class>
            <button class=check_class on:click=on_toggle>
                {step.completed.then_some("✓")}
            </button>
            <span class=name_class>{step.name}</span>
            <span class="text-xs text-slate-500">{step.duration}</span>
            <Show when=move || editing.get()>
                <button
                    class="text-slate-400 hover:text-red-600"
                    title="Delete step"
                    on:click=on_delete.clone()
                >
                    "✕"
                </button>
            </Show>
        </li>
    }
}
