//! Sentinel Dashboard
//!
//! Real-time fraud monitoring dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Token-based login against the detection API
//! - Polling refresh of statistics and the live transaction feed
//! - Fraud trend visualization
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the fraud-detection API over HTTP, refreshing
//! the monitoring view on a fixed interval while it is on screen.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
