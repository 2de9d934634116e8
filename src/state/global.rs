//! Global Application State
//!
//! Reactive state management using Leptos signals. Each remote resource is
//! bound to one `ViewState` signal; the polling controller overwrites these
//! wholesale on every successful fetch.

use leptos::*;
use std::collections::HashMap;

use crate::api::ApiError;

/// Snapshot of one remote resource.
///
/// A successful fetch replaces the payload wholesale and clears the error.
/// A failed fetch leaves the prior payload untouched (stale-on-error) and
/// records the error for the bound view to render.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState<T> {
    data: Option<T>,
    error: Option<String>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
        }
    }
}

impl<T> ViewState<T> {
    /// Apply the outcome of one fetch cycle.
    pub fn apply(&mut self, result: Result<T, ApiError>) {
        match result {
            Ok(payload) => {
                self.data = Some(payload);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
    }

    /// Latest successfully fetched payload, possibly stale.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Error from the most recent fetch, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True before the first fetch has resolved either way.
    pub fn is_pending(&self) -> bool {
        self.data.is_none() && self.error.is_none()
    }
}

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// User accounts with current balances
    pub accounts: RwSignal<ViewState<Vec<Account>>>,
    /// Autonomous-agent scheduler status
    pub agent_status: RwSignal<ViewState<AgentStatusData>>,
    /// Agent notification feed
    pub notifications: RwSignal<ViewState<NotificationFeed>>,
    /// Timestamp (ms) of the last completed refresh cycle
    pub last_refresh: RwSignal<Option<i64>>,
    /// Number of refresh cycles currently in flight. Cycles may overlap, so
    /// the footer spinner keys off `> 0` rather than a bool the earliest
    /// finisher would clear.
    pub in_flight: RwSignal<u32>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// A user account from `GET /api/accounts`
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Account {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    /// Account kind: `bank`, `wallet`, `cash`, ...
    #[serde(rename = "type")]
    pub kind: String,
    /// Balance in rupees
    pub balance: f64,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Notification urgency, from most to least severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Critical,
    High,
    Medium,
    Low,
}

impl Urgency {
    /// Sort key: critical first.
    pub fn rank(self) -> u8 {
        match self {
            Urgency::Critical => 0,
            Urgency::High => 1,
            Urgency::Medium => 2,
            Urgency::Low => 3,
        }
    }

    /// Accent classes for the notification left border and badge.
    pub fn accent_class(self) -> &'static str {
        match self {
            Urgency::Critical => "border-red-500 text-red-400",
            Urgency::High => "border-orange-500 text-orange-400",
            Urgency::Medium => "border-blue-500 text-blue-400",
            Urgency::Low => "border-green-500 text-green-400",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Urgency::Critical => "Critical",
            Urgency::High => "High",
            Urgency::Medium => "Medium",
            Urgency::Low => "Low",
        }
    }
}

/// One agent notification from the feed
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NotificationItem {
    pub id: String,
    pub title: String,
    pub message: String,
    pub urgency: Urgency,
    #[serde(default)]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub action_buttons: Vec<ActionButton>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub dismissed: bool,
}

/// A `(label, action)` pair rendered as a button on a notification
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ActionButton {
    pub label: String,
    pub action: String,
}

/// The notification feed plus the server-reported count
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationFeed {
    pub items: Vec<NotificationItem>,
    pub count: u32,
}

/// Agent scheduler status from `GET /api/agents/status`
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct AgentStatusData {
    #[serde(default)]
    pub scheduler_running: bool,
    #[serde(default)]
    pub agents: HashMap<String, AgentState>,
    #[serde(default)]
    pub total_alerts: u32,
}

/// Per-agent state inside the status payload
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct AgentState {
    #[serde(default)]
    pub alerts: Vec<serde_json::Value>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        accounts: create_rw_signal(ViewState::default()),
        agent_status: create_rw_signal(ViewState::default()),
        notifications: create_rw_signal(ViewState::default()),
        last_refresh: create_rw_signal(None),
        in_flight: create_rw_signal(0),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Mark one refresh cycle as started
    pub fn begin_refresh(&self) {
        let _ = self.in_flight.try_update(|n| *n += 1);
    }

    /// Mark one refresh cycle as finished
    pub fn end_refresh(&self) {
        let _ = self.in_flight.try_update(|n| *n = n.saturating_sub(1));
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        let _ = self.success.try_set(Some(message.to_string()));

        // try_set: the clear timer may outlive the view tree
        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            let _ = success_signal.try_set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        let _ = self.error.try_set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            let _ = error_signal.try_set(None);
        })
        .forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(balance: f64) -> Vec<Account> {
        vec![Account {
            id: None,
            name: "Cash".to_string(),
            kind: "cash".to_string(),
            balance,
            icon: None,
            color: None,
        }]
    }

    #[test]
    fn test_view_state_starts_pending() {
        let view: ViewState<Vec<Account>> = ViewState::default();
        assert!(view.is_pending());
        assert!(view.data().is_none());
        assert!(view.error().is_none());
    }

    #[test]
    fn test_success_overwrites_wholesale_and_clears_error() {
        let mut view = ViewState::default();
        view.apply(Err(ApiError::Network("HTTP 500".to_string())));
        view.apply(Ok(account(1000.0)));

        assert_eq!(view.data().unwrap()[0].balance, 1000.0);
        assert!(view.error().is_none());

        view.apply(Ok(account(250.0)));
        assert_eq!(view.data().unwrap().len(), 1);
        assert_eq!(view.data().unwrap()[0].balance, 250.0);
    }

    #[test]
    fn test_failure_keeps_stale_data_but_surfaces_error() {
        let mut view = ViewState::default();
        view.apply(Ok(account(1000.0)));
        view.apply(Err(ApiError::Parse("bad json".to_string())));

        // Stale-on-error: prior payload survives, error flag is set
        assert_eq!(view.data().unwrap()[0].balance, 1000.0);
        assert_eq!(view.error(), Some("parse error: bad json"));
        assert!(!view.is_pending());
    }

    #[test]
    fn test_resources_fail_independently() {
        let mut accounts: ViewState<Vec<Account>> = ViewState::default();
        let mut feed: ViewState<NotificationFeed> = ViewState::default();

        accounts.apply(Err(ApiError::Network("timeout".to_string())));
        feed.apply(Ok(NotificationFeed {
            items: Vec::new(),
            count: 3,
        }));

        assert!(accounts.error().is_some());
        assert_eq!(feed.data().unwrap().count, 3);
        assert!(feed.error().is_none());
    }

    #[test]
    fn test_overlapping_refreshes_keep_indicator_truthful() {
        let runtime = create_runtime();
        let state = GlobalState {
            accounts: create_rw_signal(ViewState::default()),
            agent_status: create_rw_signal(ViewState::default()),
            notifications: create_rw_signal(ViewState::default()),
            last_refresh: create_rw_signal(None),
            in_flight: create_rw_signal(0),
            error: create_rw_signal(None),
            success: create_rw_signal(None),
        };

        // A manual refresh overlapping a timer tick: the first finisher must
        // not clear the indicator while the second is still in flight
        state.begin_refresh();
        state.begin_refresh();
        state.end_refresh();
        assert_eq!(state.in_flight.get_untracked(), 1);

        state.end_refresh();
        assert_eq!(state.in_flight.get_untracked(), 0);

        // A stray extra end must not underflow
        state.end_refresh();
        assert_eq!(state.in_flight.get_untracked(), 0);

        runtime.dispose();
    }

    #[test]
    fn test_urgency_rank_orders_critical_first() {
        let mut levels = vec![Urgency::Low, Urgency::Critical, Urgency::Medium, Urgency::High];
        levels.sort_by_key(|u| u.rank());
        assert_eq!(
            levels,
            vec![Urgency::Critical, Urgency::High, Urgency::Medium, Urgency::Low]
        );
    }

    #[test]
    fn test_urgency_deserializes_from_lowercase() {
        let item: NotificationItem = serde_json::from_str(
            r#"{
                "id": "notif_1",
                "title": "Budget Alert",
                "message": "85% of food budget spent",
                "urgency": "high",
                "agent_name": "budget_guardian",
                "action_buttons": [{"label": "Adjust Budget", "action": "adjust_budget"}],
                "read": false,
                "dismissed": false
            }"#,
        )
        .unwrap();

        assert_eq!(item.urgency, Urgency::High);
        assert_eq!(item.action_buttons[0].action, "adjust_budget");
        assert!(!item.read);
    }

    #[test]
    fn test_account_deserializes_type_field() {
        let accounts: Vec<Account> = serde_json::from_str(
            r#"[{"name": "HDFC Bank", "type": "bank", "balance": 25000.0,
                 "icon": "fa-university", "color": "primary"}]"#,
        )
        .unwrap();

        assert_eq!(accounts[0].kind, "bank");
        assert_eq!(accounts[0].balance, 25000.0);
    }
}
