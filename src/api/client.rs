//! HTTP API Client
//!
//! Functions for communicating with the FinBuddy REST API. One function per
//! endpoint; all return typed payloads or an `ApiError`.

use gloo_net::http::Request;

use crate::api::error::ApiError;
use crate::state::global::{Account, AgentStatusData, NotificationFeed, NotificationItem};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item("finbuddy_api_url") {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item("finbuddy_api_url", url);
        }
    }
}

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
struct AgentStatusResponse {
    #[allow(dead_code)]
    success: bool,
    data: AgentStatusData,
}

#[derive(Debug, serde::Deserialize)]
struct NotificationListResponse {
    #[allow(dead_code)]
    success: bool,
    count: u32,
    notifications: Vec<NotificationItem>,
}

// ============ Request Helpers ============

async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Network(format!("HTTP {}", response.status())));
    }

    response
        .json()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// POST with empty body; only the HTTP status matters.
async fn post_empty(url: &str) -> Result<(), ApiError> {
    let response = Request::post(url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Network(format!("HTTP {}", response.status())));
    }

    Ok(())
}

// ============ API Functions ============

/// Fetch all accounts with current balances
pub async fn fetch_accounts() -> Result<Vec<Account>, ApiError> {
    let api_base = get_api_base();
    get_json(&format!("{}/api/accounts", api_base)).await
}

/// Fetch autonomous-agent scheduler status
pub async fn fetch_agent_status() -> Result<AgentStatusData, ApiError> {
    let api_base = get_api_base();
    let response: AgentStatusResponse =
        get_json(&format!("{}/api/agents/status", api_base)).await?;
    Ok(response.data)
}

/// Fetch the notification feed
pub async fn fetch_notifications(
    unread_only: bool,
    limit: u32,
) -> Result<NotificationFeed, ApiError> {
    let api_base = get_api_base();
    let response: NotificationListResponse = get_json(&format!(
        "{}/api/agents/notifications?unread_only={}&limit={}",
        api_base, unread_only, limit
    ))
    .await?;

    Ok(NotificationFeed {
        items: response.notifications,
        count: response.count,
    })
}

/// Mark a notification as read
pub async fn mark_notification_read(id: &str) -> Result<(), ApiError> {
    let api_base = get_api_base();
    post_empty(&format!("{}/api/agents/notifications/{}/read", api_base, id)).await
}

/// Dismiss a notification
pub async fn dismiss_notification(id: &str) -> Result<(), ApiError> {
    let api_base = get_api_base();
    post_empty(&format!(
        "{}/api/agents/notifications/{}/dismiss",
        api_base, id
    ))
    .await
}

/// Trigger a demo scenario (`budget-alert`, `gst-warning`, ...)
pub async fn trigger_demo(scenario_slug: &str) -> Result<(), ApiError> {
    let api_base = get_api_base();
    post_empty(&format!("{}/api/agents/demo/{}", api_base, scenario_slug)).await
}

/// Export all user data; returns the raw JSON blob for download
pub async fn export_data() -> Result<String, ApiError> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/api/privacy/export", api_base))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Network(format!("HTTP {}", response.status())));
    }

    response
        .text()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Delete all account data (right to be forgotten)
pub async fn delete_account() -> Result<(), ApiError> {
    let api_base = get_api_base();

    let response = Request::delete(&format!("{}/api/privacy/account", api_base))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Network(format!("HTTP {}", response.status())));
    }

    Ok(())
}
