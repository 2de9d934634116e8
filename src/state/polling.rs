//! Polling Controller
//!
//! Keeps the rendered views eventually consistent with remote state. Owns at
//! most one polling session; every tick re-fetches all registered resources
//! concurrently and applies each result independently, so one endpoint going
//! down never blanks the others.
//!
//! There is no retry/backoff: a failed cycle leaves stale data on screen
//! with an error flag, and the next scheduled tick is the retry. `stop()`
//! only cancels future ticks; in-flight requests are allowed to land and
//! apply last-write-wins, which is safe because every application is a
//! whole-state overwrite.

use gloo_timers::callback::Interval;
use leptos::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::api;
use crate::state::global::GlobalState;

/// Default refresh cadence for the dashboard
pub const DEFAULT_POLL_MS: u32 = 30_000;

/// How many notifications each cycle asks for
pub const NOTIFICATION_FETCH_LIMIT: u32 = 20;

/// Lifecycle errors of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PollingError {
    /// `start` was called while a session is active. Stop the current
    /// session first; stacking intervals would leak timers.
    #[error("a polling session is already active")]
    SessionActive,
}

/// Remote mutations a user can trigger from the rendered views
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerAction {
    MarkRead(String),
    Dismiss(String),
    TriggerDemo(DemoScenario),
}

/// Demo scenarios exposed by `POST /api/agents/demo/{type}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoScenario {
    BudgetAlert,
    GstWarning,
    SavingsOpportunity,
}

impl DemoScenario {
    /// Path segment used by the demo endpoint
    pub fn endpoint_slug(self) -> &'static str {
        match self {
            DemoScenario::BudgetAlert => "budget-alert",
            DemoScenario::GstWarning => "gst-warning",
            DemoScenario::SavingsOpportunity => "savings-opportunity",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DemoScenario::BudgetAlert => "Budget alert",
            DemoScenario::GstWarning => "GST warning",
            DemoScenario::SavingsOpportunity => "Savings opportunity",
        }
    }
}

/// One active polling session: the live interval plus its cadence.
struct Session {
    _interval: Interval,
    cadence_ms: u32,
}

/// Periodic-refresh view-model synchronization controller.
///
/// Cloning shares the session slot, so a clone captured by the interval
/// callback drives the same controller the page holds.
#[derive(Clone)]
pub struct PollingController {
    state: GlobalState,
    session: Rc<RefCell<Option<Session>>>,
    cycles: Rc<Cell<u64>>,
}

impl PollingController {
    pub fn new(state: GlobalState) -> Self {
        Self {
            state,
            session: Rc::new(RefCell::new(None)),
            cycles: Rc::new(Cell::new(0)),
        }
    }

    /// Number of refresh cycles started over the controller's lifetime
    pub fn refresh_count(&self) -> u64 {
        self.cycles.get()
    }

    /// Begin a polling session: one immediate refresh, then one refresh
    /// every `cadence_ms`. Fails if a session is already active.
    pub fn start(&self, cadence_ms: u32) -> Result<(), PollingError> {
        let mut slot = self.session.borrow_mut();
        if slot.is_some() {
            return Err(PollingError::SessionActive);
        }

        self.refresh_once();

        let controller = self.clone();
        let interval = Interval::new(cadence_ms, move || controller.refresh_once());
        *slot = Some(Session {
            _interval: interval,
            cadence_ms,
        });

        Ok(())
    }

    /// Cancel the pending timer. Idempotent; in-flight requests are not
    /// aborted and may still apply when they land.
    pub fn stop(&self) {
        // Dropping the Interval cancels it
        self.session.borrow_mut().take();
    }

    pub fn is_active(&self) -> bool {
        self.session.borrow().is_some()
    }

    /// Cadence of the active session, if any
    pub fn cadence_ms(&self) -> Option<u32> {
        self.session.borrow().as_ref().map(|s| s.cadence_ms)
    }

    /// Fetch all registered resources concurrently and apply each result
    /// independently. Total latency is bounded by the slowest call, not the
    /// sum. Overlapping cycles are accepted; later-resolving results win.
    pub fn refresh_once(&self) {
        self.cycles.set(self.cycles.get() + 1);

        let state = self.state.clone();
        spawn_local(async move {
            state.begin_refresh();

            let (accounts, agent_status, notifications) = futures_util::join!(
                api::fetch_accounts(),
                api::fetch_agent_status(),
                api::fetch_notifications(false, NOTIFICATION_FETCH_LIMIT),
            );

            if let Err(e) = &accounts {
                web_sys::console::error_1(&format!("Failed to fetch accounts: {}", e).into());
            }
            if let Err(e) = &agent_status {
                web_sys::console::error_1(&format!("Failed to fetch agent status: {}", e).into());
            }
            if let Err(e) = &notifications {
                web_sys::console::error_1(&format!("Failed to fetch notifications: {}", e).into());
            }

            // try_* variants: the responses may land after the owning view
            // tree was torn down, and a late application must be a no-op
            let _ = state.accounts.try_update(|view| view.apply(accounts));
            let _ = state.agent_status.try_update(|view| view.apply(agent_status));
            let _ = state.notifications.try_update(|view| view.apply(notifications));

            let _ = state
                .last_refresh
                .try_set(Some(chrono::Utc::now().timestamp_millis()));
            state.end_refresh();
        });
    }

    /// Send a remote mutation, then re-fetch everything regardless of the
    /// mutation's outcome so views reflect the server's authoritative state
    /// rather than an optimistic local guess.
    pub fn perform_action(&self, action: ControllerAction) {
        let controller = self.clone();
        spawn_local(async move {
            let result = match &action {
                ControllerAction::MarkRead(id) => api::mark_notification_read(id).await,
                ControllerAction::Dismiss(id) => api::dismiss_notification(id).await,
                ControllerAction::TriggerDemo(scenario) => {
                    api::trigger_demo(scenario.endpoint_slug()).await
                }
            };

            match result {
                Ok(()) => {
                    if let ControllerAction::TriggerDemo(scenario) = &action {
                        controller
                            .state
                            .show_success(&format!("{} demo triggered", scenario.label()));
                    }
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Action failed: {}", e).into());
                    controller.state.show_error(&format!("Action failed: {}", e));
                }
            }

            // Exactly one refresh per action, success or not
            controller.refresh_once();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scenario_slugs_match_endpoints() {
        assert_eq!(DemoScenario::BudgetAlert.endpoint_slug(), "budget-alert");
        assert_eq!(DemoScenario::GstWarning.endpoint_slug(), "gst-warning");
        assert_eq!(
            DemoScenario::SavingsOpportunity.endpoint_slug(),
            "savings-opportunity"
        );
    }

    #[test]
    fn test_session_active_error_message() {
        assert_eq!(
            PollingError::SessionActive.to_string(),
            "a polling session is already active"
        );
    }
}

// Timer-backed lifecycle tests need a browser event loop; run with
// `wasm-pack test --headless --chrome`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::state::global::ViewState;
    use gloo_timers::future::TimeoutFuture;
    use leptos::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn test_state() -> GlobalState {
        GlobalState {
            accounts: create_rw_signal(ViewState::default()),
            agent_status: create_rw_signal(ViewState::default()),
            notifications: create_rw_signal(ViewState::default()),
            last_refresh: create_rw_signal(None),
            in_flight: create_rw_signal(0),
            error: create_rw_signal(None),
            success: create_rw_signal(None),
        }
    }

    fn with_controller(f: impl FnOnce(PollingController)) {
        let runtime = create_runtime();
        f(PollingController::new(test_state()));
        runtime.dispose();
    }

    #[wasm_bindgen_test]
    fn test_start_twice_keeps_one_session() {
        with_controller(|controller| {
            assert!(controller.start(60_000).is_ok());
            assert_eq!(controller.start(60_000), Err(PollingError::SessionActive));
            assert!(controller.is_active());
            assert_eq!(controller.cadence_ms(), Some(60_000));
            controller.stop();
        });
    }

    #[wasm_bindgen_test]
    fn test_stop_is_idempotent() {
        with_controller(|controller| {
            controller.stop();
            assert!(!controller.is_active());

            assert!(controller.start(60_000).is_ok());
            controller.stop();
            controller.stop();
            assert!(!controller.is_active());

            // A fresh session may begin after stop
            assert!(controller.start(5_000).is_ok());
            controller.stop();
        });
    }

    #[wasm_bindgen_test]
    async fn test_failed_action_still_triggers_exactly_one_refresh() {
        let runtime = create_runtime();
        let state = test_state();
        let controller = PollingController::new(state.clone());

        // Unreachable port: the mutation and the follow-up fetches all fail
        // fast, so the view must fall back to the server-state re-sync
        crate::api::set_api_base("http://127.0.0.1:9");

        assert_eq!(controller.refresh_count(), 0);
        controller.perform_action(ControllerAction::MarkRead("notif_1".to_string()));

        while controller.refresh_count() == 0 {
            TimeoutFuture::new(10).await;
        }
        // Settle long enough for a stray second refresh to show up
        TimeoutFuture::new(100).await;

        assert_eq!(controller.refresh_count(), 1);
        // The cycle completed: even an all-error refresh stamps the clock
        assert!(state.last_refresh.get_untracked().is_some());
        assert_eq!(state.in_flight.get_untracked(), 0);

        runtime.dispose();
    }
}
