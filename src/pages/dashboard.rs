//! Dashboard Page
//!
//! Accounts overview and the autonomous-agent panel. Starts the polling
//! session on mount and stops it when the page is torn down.

use leptos::*;

use crate::components::{AccountCard, CardSkeleton, NotificationPanel};
use crate::state::global::GlobalState;
use crate::state::polling::{ControllerAction, DemoScenario, PollingController, DEFAULT_POLL_MS};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let controller = use_context::<PollingController>().expect("PollingController not found");

    // Begin polling on mount. The guard makes a second mount harmless.
    let controller_for_start = controller.clone();
    create_effect(move |_| {
        if let Err(e) = controller_for_start.start(DEFAULT_POLL_MS) {
            web_sys::console::warn_1(&format!("Polling not started: {}", e).into());
        }
    });

    let controller_for_cleanup = controller.clone();
    on_cleanup(move || controller_for_cleanup.stop());

    let controller_for_refresh = controller.clone();
    let manual_refresh = move |_| controller_for_refresh.refresh_once();

    view! {
        <div class="space-y-8">
            // Page header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Dashboard"</h1>
                    <p class="text-gray-400 mt-1">"Your money at a glance"</p>
                </div>

                <button
                    on:click=manual_refresh
                    class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm font-medium transition-colors"
                >
                    "Refresh"
                </button>
            </div>

            // Account balances
            <section>
                <h2 class="text-lg font-semibold mb-4">"Accounts"</h2>
                <AccountsGrid />
            </section>

            // Agent status strip
            <AgentStatusStrip />

            // Two column layout for notifications and demo triggers
            <div class="grid md:grid-cols-3 gap-8">
                <div class="md:col-span-2">
                    <NotificationPanel />
                </div>
                <DemoTriggers />
            </div>

            // Polling indicator
            <p class="text-xs text-gray-500">
                {move || {
                    state.last_refresh.get()
                        .and_then(|ts| chrono::DateTime::from_timestamp_millis(ts))
                        .map(|dt| format!("Last refreshed {}", dt.format("%H:%M:%S")))
                        .unwrap_or_else(|| "Waiting for first refresh".to_string())
                }}
            </p>
        </div>
    }
}

/// Grid of account cards with pending and failure fallbacks
#[component]
fn AccountsGrid() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div>
            {move || {
                let view = state.accounts.get();

                if view.is_pending() {
                    return view! {
                        <div class="grid grid-cols-2 md:grid-cols-3 gap-4">
                            <CardSkeleton />
                            <CardSkeleton />
                            <CardSkeleton />
                        </div>
                    }.into_view();
                }

                match view.data() {
                    Some(accounts) if !accounts.is_empty() => view! {
                        <div class="grid grid-cols-2 md:grid-cols-3 gap-4">
                            {accounts.iter().cloned().map(|account| view! {
                                <AccountCard account=account />
                            }).collect_view()}
                        </div>
                    }.into_view(),
                    Some(_) => view! {
                        <p class="text-gray-400 text-sm">"No accounts yet"</p>
                    }.into_view(),
                    None => view! {
                        <p class="text-gray-400 text-sm">"Could not load accounts"</p>
                    }.into_view(),
                }
            }}

            // Stale data stays on screen when a later fetch fails
            {move || {
                let view = state.accounts.get();
                (view.error().is_some() && view.data().is_some()).then(|| view! {
                    <p class="text-yellow-400 text-xs mt-2">"Showing last known balances; refresh failed"</p>
                })
            }}
        </div>
    }
}

/// Scheduler status and total alert count
#[component]
fn AgentStatusStrip() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <section class="bg-gray-800 rounded-xl px-6 py-4 flex items-center justify-between">
            <div class="flex items-center space-x-3">
                <span class="text-2xl">"🤖"</span>
                <span class="font-medium">"Autonomous Agents"</span>
            </div>

            {move || {
                let view = state.agent_status.get();
                match view.data() {
                    Some(status) => {
                        let (dot, text) = if status.scheduler_running {
                            ("bg-green-400", "Running")
                        } else {
                            ("bg-gray-500", "Stopped")
                        };
                        view! {
                            <div class="flex items-center space-x-4 text-sm">
                                <span class="flex items-center space-x-2">
                                    <span class=format!("w-2 h-2 rounded-full {}", dot) />
                                    <span class="text-gray-300">{text}</span>
                                </span>
                                <span class="text-gray-400">
                                    {format!("{} active agents", status.agents.len())}
                                </span>
                                <span class="text-gray-400">
                                    {format!("{} alerts", status.total_alerts)}
                                </span>
                            </div>
                        }.into_view()
                    }
                    None => view! {
                        <span class="text-gray-400 text-sm">"Could not load agent status"</span>
                    }.into_view(),
                }
            }}
        </section>
    }
}

/// Buttons that trigger demo scenarios on the backend
#[component]
fn DemoTriggers() -> impl IntoView {
    let controller = use_context::<PollingController>().expect("PollingController not found");

    let scenarios = [
        DemoScenario::BudgetAlert,
        DemoScenario::GstWarning,
        DemoScenario::SavingsOpportunity,
    ];

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-1">"Demo Scenarios"</h2>
            <p class="text-gray-400 text-sm mb-4">"Ask an agent to raise a sample alert"</p>

            <div class="space-y-2">
                {scenarios.into_iter().map(|scenario| {
                    let controller = controller.clone();
                    view! {
                        <button
                            on:click=move |_| controller.perform_action(
                                ControllerAction::TriggerDemo(scenario),
                            )
                            class="w-full px-4 py-3 bg-gray-700 hover:bg-gray-600 rounded-lg
                                   text-left text-sm font-medium transition-colors"
                        >
                            {scenario.label()}
                        </button>
                    }
                }).collect_view()}
            </div>
        </section>
    }
}
