//! Pages
//!
//! Top-level page components for each route.

pub mod dashboard;
pub mod privacy;

pub use dashboard::Dashboard;
pub use privacy::Privacy;
