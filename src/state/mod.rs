//! State Management
//!
//! Global reactive state and the polling controller that keeps it in sync
//! with the backend.

pub mod global;
pub mod polling;

pub use global::{provide_global_state, Account, GlobalState, NotificationItem, Urgency, ViewState};
pub use polling::{ControllerAction, DemoScenario, PollingController, PollingError};
