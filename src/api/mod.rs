//! API Layer
//!
//! HTTP client functions and the error taxonomy for talking to the
//! FinBuddy backend.

pub mod client;
pub mod error;

pub use client::*;
pub use error::ApiError;
