//! FinBuddy Dashboard
//!
//! Personal-finance dashboard frontend built with Leptos (WASM).
//!
//! # Features
//!
//! - Account balances at a glance
//! - Autonomous-agent notifications with urgency levels
//! - Periodic background refresh of remote state
//! - Data export and account deletion (right to be forgotten)
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All state is either ephemeral in-memory or remote: the app
//! keeps its views eventually consistent with the FinBuddy API by polling.

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
