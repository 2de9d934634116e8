//! App Root Component
//!
//! Main application component with routing and global providers. The
//! polling controller is built here once and handed to the tree via
//! context, so every handler binds to the same instance.

use leptos::*;
use leptos_router::*;

use crate::components::{Nav, Toast};
use crate::pages::{Dashboard, Privacy};
use crate::state::global::{provide_global_state, GlobalState};
use crate::state::polling::PollingController;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    // One controller per page; pages start and stop its session
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    provide_context(PollingController::new(state));

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                // Navigation header
                <Nav />

                // Main content area
                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/" view=Dashboard />
                        <Route path="/privacy" view=Privacy />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                // Footer with refresh status
                <Footer />

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// Footer component showing refresh status
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                // Last refresh time
                <div class="text-gray-400">
                    {move || {
                        state.last_refresh.get()
                            .and_then(|ts| chrono::DateTime::from_timestamp_millis(ts))
                            .map(|dt| format!("Last refresh: {}", dt.format("%H:%M:%S")))
                            .unwrap_or_else(|| "Not refreshed yet".to_string())
                    }}
                </div>

                // Loading indicator
                {move || {
                    if state.in_flight.get() > 0 {
                        view! {
                            <div class="flex items-center space-x-2 text-primary-400">
                                <div class="loading-spinner w-4 h-4" />
                                <span>"Refreshing..."</span>
                            </div>
                        }.into_view()
                    } else {
                        view! {}.into_view()
                    }
                }}
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}
