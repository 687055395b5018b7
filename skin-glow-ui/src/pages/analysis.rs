//! Analysis Tab
//!
//! Camera preview, photo capture and the (simulated) skin analysis result.
//! The `<video>` element is always mounted so the stream can be attached to
//! it as soon as the camera opens.

use gloo_timers::callback::Timeout;
use leptos::*;
use skin_glow::analysis::{
    AnalysisResult, Camera, CaptureSession, FrameImage, MockAnalyzer, SkinAnalyzer, CAMERA_ALERT,
};

use crate::camera::{WebCamera, WebStream};
use crate::components::InlineLoading;
use crate::state::global::GlobalState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Idle,
    Streaming,
    Analyzing,
    Complete,
}

fn alert_camera_failure() {
    if let Some(window) = web_sys::window() {
        // Nothing left to report to if the alert itself fails
        let _ = window.alert_with_message(CAMERA_ALERT);
    }
}

#[component]
pub fn AnalysisTab() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let session = create_rw_signal(CaptureSession::<WebStream>::new());
    let video_ref = create_node_ref::<html::Video>();
    let pending = store_value(None::<Timeout>);
    let (starting, set_starting) = create_signal(false);
    let analyzer = MockAnalyzer::default();

    let view_state = move || {
        session.with(|s| {
            if s.is_streaming() {
                Stage::Streaming
            } else if s.is_analyzing() {
                Stage::Analyzing
            } else if s.result().is_some() {
                Stage::Complete
            } else {
                Stage::Idle
            }
        })
    };

    let start_camera = {
        let state = state.clone();
        move |_: ev::MouseEvent| {
            set_starting.set(true);
            let state = state.clone();
            spawn_local(async move {
                match WebCamera.open().await {
                    Ok(mut stream) => {
                        if let Some(video) = video_ref.get_untracked() {
                            stream.attach_preview((*video).clone());
                        }
                        if let Some(Err(e)) = session.try_update(|s| s.attach(stream)) {
                            state.show_error(&e.to_string());
                        }
                    }
                    Err(e) => {
                        web_sys::console::warn_1(&format!("Camera error: {}", e).into());
                        alert_camera_failure();
                    }
                }
                set_starting.set(false);
            });
        }
    };

    let capture = {
        let state = state.clone();
        move |_: ev::MouseEvent| match session.try_update(|s| s.capture()) {
            Some(Ok(capture_id)) => {
                let timer = Timeout::new(analyzer.latency().as_millis() as u32, move || {
                    session.update(|s| {
                        s.finish_analysis(capture_id, &analyzer);
                    });
                });
                pending.set_value(Some(timer));
            }
            Some(Err(e)) => state.show_error(&e.to_string()),
            None => {}
        }
    };

    // Dropping a pending timeout cancels it
    let cancel = move |_: ev::MouseEvent| {
        pending.set_value(None);
        session.update(|s| {
            s.cancel();
        });
    };

    let analyze_again = move |_: ev::MouseEvent| {
        pending.set_value(None);
        session.update(|s| s.reset());
    };

    on_cleanup(move || {
        pending.try_update_value(|p| p.take());
        session.try_update_untracked(|s| s.reset());
    });

    let frame_src = move || {
        session.with(|s| match s.frame().map(|f| &f.image) {
            Some(FrameImage::DataUrl(url)) => Some(url.clone()),
            _ => None,
        })
    };

    view! {
        <div class="bg-white/80 dark:bg-slate-900/80 rounded-2xl shadow-lg p-6 space-y-6">
            <h2 class="text-2xl font-bold">"Skin Analysis"</h2>

            <div class="relative rounded-xl overflow-hidden bg-slate-100 dark:bg-slate-800 aspect-video flex items-center justify-center">
                <video
                    node_ref=video_ref
                    autoplay=true
                    playsinline=true
                    muted=true
                    class="w-full h-full object-cover"
                    class:hidden=move || view_state() != Stage::Streaming
                />

                {move || match view_state() {
                    Stage::Idle => view! {
                        <div class="text-center p-8">
                            <p class="text-5xl mb-3">"📷"</p>
                            <p class="text-slate-600 dark:text-slate-400">"Ready to analyze your skin"</p>
                        </div>
                    }.into_view(),
                    Stage::Streaming => ().into_view(),
                    Stage::Analyzing | Stage::Complete => frame_src()
                        .map(|src| view! {
                            <img src=src alt="Captured photo" class="w-full h-full object-cover" />
                        })
                        .into_view(),
                }}
            </div>

            {move || match view_state() {
                Stage::Idle => view! {
                    <button
                        class="w-full py-3 rounded-lg bg-gradient-to-r from-rose-500 to-pink-500 text-white font-semibold disabled:opacity-50"
                        disabled=starting
                        on:click=start_camera.clone()
                    >
                        {move || if starting.get() { "Starting..." } else { "Start Camera" }}
                    </button>
                }.into_view(),
                Stage::Streaming => view! {
                    <div class="flex gap-3">
                        <button
                            class="flex-1 py-3 rounded-lg bg-gradient-to-r from-rose-500 to-pink-500 text-white font-semibold"
                            on:click=capture.clone()
                        >
                            "📸 Capture Photo"
                        </button>
                        <button
                            class="px-6 py-3 rounded-lg bg-slate-100 dark:bg-slate-800 font-medium"
                            on:click=cancel
                        >
                            "Cancel"
                        </button>
                    </div>
                }.into_view(),
                Stage::Analyzing => view! {
                    <div class="flex items-center justify-center gap-3 py-4 text-slate-600 dark:text-slate-400">
                        <InlineLoading />
                        <span>"Analyzing your skin..."</span>
                    </div>
                }.into_view(),
                Stage::Complete => view! {
                    {move || session.with(|s| s.result().cloned()).map(|result| view! {
                        <ResultPanel result=result />
                    })}
                    <button
                        class="w-full py-3 rounded-lg border border-rose-300 dark:border-slate-600 text-rose-600 dark:text-rose-400 font-semibold"
                        on:click=analyze_again
                    >
                        "Analyze Again"
                    </button>
                }.into_view(),
            }}
        </div>
    }
}

#[component]
fn ResultPanel(result: AnalysisResult) -> impl IntoView {
    let fields = [
        ("Skin Tone", result.skin_tone),
        ("Hydration", result.hydration_level),
        ("Oiliness", result.oiliness),
        ("Sensitivity", result.sensitivity),
        ("Texture", result.texture),
    ];

    view! {
        <div class="space-y-4">
            <div class="grid grid-cols-2 gap-3">
                {fields
                    .into_iter()
                    .map(|(label, value)| view! {
                        <div class="p-3 rounded-lg bg-rose-50 dark:bg-slate-800">
                            <p class="text-xs text-slate-500">{label}</p>
                            <p class="font-semibold">{value}</p>
                        </div>
                    })
                    .collect_view()}
            </div>

            <div>
                <h3 class="font-semibold mb-2">"Areas of Concern"</h3>
                <ul class="space-y-1">
                    {result
                        .concerns
                        .into_iter()
                        .map(|c| view! {
                            <li class="flex items-center gap-2 text-sm">
                                <span class="w-1.5 h-1.5 rounded-full bg-rose-500" />
                                {c}
                            </li>
                        })
                        .collect_view()}
                </ul>
            </div>
        </div>
    }
}
