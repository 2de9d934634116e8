//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod account_card;
pub mod loading;
pub mod nav;
pub mod notifications;
pub mod toast;

pub use account_card::AccountCard;
pub use loading::{CardSkeleton, ListSkeleton};
pub use nav::Nav;
pub use notifications::NotificationPanel;
pub use toast::Toast;
