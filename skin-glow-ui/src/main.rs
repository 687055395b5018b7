//! Skin Glow Web App
//!
//! Skincare routine tracker built with Leptos (WASM).
//!
//! # Features
//!
//! - AM/PM routines that follow the local clock
//! - Active ingredient tracking
//! - Camera skin analysis (simulated)
//! - Progress charts and a downloadable JSON report
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos application compiled to WebAssembly.
//! All state lives in the `skin-glow` core crate and is persisted to
//! `localStorage`; there is no server.

use leptos::*;

mod app;
mod camera;
mod components;
mod download;
mod logging;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();
    logging::init();

    mount_to_body(|| view! { <app::App /> });
}
