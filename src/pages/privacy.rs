//! Privacy Page
//!
//! Data export, account deletion, and API connection settings.

use leptos::*;
use wasm_bindgen::JsCast;

use crate::api;
use crate::api::ApiError;
use crate::state::global::GlobalState;

/// Exact challenge text required before account deletion
const DELETE_CHALLENGE: &str = "DELETE";

/// Download filename for an export performed on `date`
pub fn export_filename(date: chrono::NaiveDate) -> String {
    format!("export_{}.json", date.format("%Y-%m-%d"))
}

/// Case-sensitive check of the deletion challenge text
pub fn challenge_accepted(input: &str) -> bool {
    input == DELETE_CHALLENGE
}

/// Privacy page component
#[component]
pub fn Privacy() -> impl IntoView {
    view! {
        <div class="space-y-8">
            // Header
            <div>
                <h1 class="text-3xl font-bold">"Privacy"</h1>
                <p class="text-gray-400 mt-1">"Your data, your rules"</p>
            </div>

            <ExportSection />
            <DangerZone />
            <ApiSettings />
        </div>
    }
}

/// Data export section
#[component]
fn ExportSection() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (exporting, set_exporting) = create_signal(false);

    let state_for_export = state;
    let export_data = move |_| {
        set_exporting.set(true);

        let state_clone = state_for_export.clone();
        spawn_local(async move {
            match api::export_data().await {
                Ok(data) => {
                    let filename = export_filename(chrono::Utc::now().date_naive());
                    if trigger_download(&data, &filename).is_some() {
                        state_clone.show_success("Data exported successfully");
                    } else {
                        state_clone.show_error("Could not start the download");
                    }
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Export failed: {}", e).into());
                    state_clone.show_error(&format!("Export failed: {}", e));
                }
            }
            set_exporting.set(false);
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <div class="flex items-center justify-between">
                <div>
                    <h2 class="text-xl font-semibold">"Export Data"</h2>
                    <p class="text-sm text-gray-400 mt-1">
                        "Download everything FinBuddy knows about you as JSON"
                    </p>
                </div>
                <button
                    on:click=export_data
                    disabled=move || exporting.get()
                    class="px-4 py-2 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                           rounded-lg font-medium transition-colors"
                >
                    {move || if exporting.get() { "Exporting..." } else { "Export" }}
                </button>
            </div>
        </section>
    }
}

/// Offer a string as a file download via a temporary object URL
fn trigger_download(contents: &str, filename: &str) -> Option<()> {
    let window = web_sys::window()?;
    let document = window.document()?;

    let blob =
        web_sys::Blob::new_with_str_sequence(&js_sys::Array::of1(&contents.into())).ok()?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).ok()?;

    let anchor = document.create_element("a").ok()?;
    anchor.set_attribute("href", &url).ok()?;
    anchor.set_attribute("download", filename).ok()?;
    anchor.dyn_ref::<web_sys::HtmlElement>()?.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Some(())
}

/// Account deletion with double confirmation
#[component]
fn DangerZone() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (deleting, set_deleting) = create_signal(false);

    let state_for_delete = state;
    let delete_account = move |_| {
        let state_clone = state_for_delete.clone();

        if let Err(ApiError::Cancelled) = confirm_deletion() {
            state_clone.show_error("Deletion cancelled");
            return;
        }

        set_deleting.set(true);
        spawn_local(async move {
            match api::delete_account().await {
                Ok(()) => {
                    // The server is now empty; reload to a clean slate
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().reload();
                    }
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Deletion failed: {}", e).into());
                    state_clone.show_error(&format!("Deletion failed: {}", e));
                }
            }
            set_deleting.set(false);
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 border border-red-900">
            <div class="flex items-center justify-between">
                <div>
                    <h2 class="text-xl font-semibold text-red-400">"Delete Account"</h2>
                    <p class="text-sm text-gray-400 mt-1">
                        "Permanently erase all account data. This cannot be undone."
                    </p>
                </div>
                <button
                    on:click=delete_account
                    disabled=move || deleting.get()
                    class="px-4 py-2 bg-red-600 hover:bg-red-500 disabled:bg-gray-700
                           rounded-lg font-medium transition-colors"
                >
                    {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                </button>
            </div>
        </section>
    }
}

/// Two sequential confirmations: a yes/no dialog, then an exact-text
/// challenge. Declining either aborts before any request is sent.
fn confirm_deletion() -> Result<(), ApiError> {
    let window = web_sys::window().ok_or(ApiError::Cancelled)?;

    let confirmed = window
        .confirm_with_message(
            "This permanently deletes all your FinBuddy data. Continue?",
        )
        .unwrap_or(false);
    if !confirmed {
        return Err(ApiError::Cancelled);
    }

    let challenge = window
        .prompt_with_message(&format!("Type {} to confirm", DELETE_CHALLENGE))
        .ok()
        .flatten()
        .unwrap_or_default();
    if !challenge_accepted(&challenge) {
        return Err(ApiError::Cancelled);
    }

    Ok(())
}

/// API connection settings
#[component]
fn ApiSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (testing, set_testing) = create_signal(false);

    let state_for_test = state.clone();
    let test_connection = move |_| {
        set_testing.set(true);

        let url = api_url.get();
        api::set_api_base(&url);

        let state_clone = state_for_test.clone();
        spawn_local(async move {
            match api::fetch_accounts().await {
                Ok(_) => state_clone.show_success("Connection successful!"),
                Err(e) => state_clone.show_error(&format!("Connection failed: {}", e)),
            }
            set_testing.set(false);
        });
    };

    let state_for_save = state;
    let save_url = move |_| {
        let url = api_url.get();
        api::set_api_base(&url);
        state_for_save.show_success("API URL saved");
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"API Connection"</h2>

            <label class="block text-sm text-gray-400 mb-2">"FinBuddy API URL"</label>
            <div class="flex space-x-2">
                <input
                    type="text"
                    prop:value=move || api_url.get()
                    on:input=move |ev| set_api_url.set(event_target_value(&ev))
                    class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
                <button
                    on:click=test_connection
                    disabled=move || testing.get()
                    class="px-4 py-3 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                           rounded-lg font-medium transition-colors"
                >
                    {move || if testing.get() { "Testing..." } else { "Test" }}
                </button>
                <button
                    on:click=save_url
                    class="px-4 py-3 bg-primary-600 hover:bg-primary-700
                           rounded-lg font-medium transition-colors"
                >
                    "Save"
                </button>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filename_uses_iso_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        assert_eq!(export_filename(date), "export_2026-08-29.json");
    }

    #[test]
    fn test_challenge_requires_exact_text() {
        assert!(challenge_accepted("DELETE"));
    }

    #[test]
    fn test_challenge_rejects_wrong_case() {
        // Wrong case must never reach the DELETE request
        assert!(!challenge_accepted("delete"));
        assert!(!challenge_accepted("Delete"));
    }

    #[test]
    fn test_challenge_rejects_padding_and_empty() {
        assert!(!challenge_accepted(""));
        assert!(!challenge_accepted(" DELETE"));
        assert!(!challenge_accepted("DELETE "));
    }
}
