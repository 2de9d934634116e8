//! Notification Panel Component
//!
//! Agent notification feed with an unread badge, urgency styling, and
//! mark-read / dismiss controls. Display logic is kept in pure functions so
//! badge and ordering rules are unit-testable.

use leptos::*;

use crate::components::loading::ListSkeleton;
use crate::state::global::{GlobalState, NotificationFeed, NotificationItem};
use crate::state::polling::{ControllerAction, PollingController};

/// Badge text for the panel header. `None` means the badge is hidden.
pub fn badge_label(count: u32) -> Option<String> {
    if count == 0 {
        None
    } else {
        Some(count.to_string())
    }
}

/// Notifications in display order: dismissed ones filtered out, then sorted
/// by urgency (critical first) and recency.
pub fn visible_notifications(feed: &NotificationFeed) -> Vec<NotificationItem> {
    let mut items: Vec<NotificationItem> = feed
        .items
        .iter()
        .filter(|n| !n.dismissed)
        .cloned()
        .collect();

    items.sort_by(|a, b| {
        a.urgency
            .rank()
            .cmp(&b.urgency.rank())
            .then_with(|| b.created_at.cmp(&a.created_at))
    });

    items
}

/// Short display time for a notification, e.g. `Aug 29, 14:05`
pub fn display_time(created_at: Option<&str>) -> Option<String> {
    let raw = created_at?;
    // Backend sends naive ISO timestamps without an offset
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.format("%b %d, %H:%M").to_string())
        .ok()
}

/// Notification panel with badge and feed
#[component]
pub fn NotificationPanel() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-xl font-semibold">"Agent Notifications"</h2>
                {move || {
                    let view = state.notifications.get();
                    view.data()
                        .and_then(|feed| badge_label(feed.count))
                        .map(|label| view! {
                            <span class="bg-red-600 text-white text-xs font-bold rounded-full px-2 py-1">
                                {label}
                            </span>
                        })
                }}
            </div>

            {move || {
                let view = state.notifications.get();

                if view.is_pending() {
                    return view! { <ListSkeleton /> }.into_view();
                }

                match view.data() {
                    Some(feed) => {
                        let items = visible_notifications(feed);
                        if items.is_empty() {
                            view! {
                                <p class="text-gray-400 text-sm">"No notifications. Your agents are quiet."</p>
                            }.into_view()
                        } else {
                            items.into_iter().map(|item| view! {
                                <NotificationRow item=item />
                            }).collect_view()
                        }
                    }
                    // No data ever arrived and the fetch failed
                    None => view! {
                        <p class="text-gray-400 text-sm">"Could not load notifications"</p>
                    }.into_view(),
                }
            }}
        </section>
    }
}

/// One notification in the feed
#[component]
fn NotificationRow(item: NotificationItem) -> impl IntoView {
    let controller = use_context::<PollingController>().expect("PollingController not found");

    let accent = item.urgency.accent_class();
    let urgency_label = item.urgency.label();
    let time = display_time(item.created_at.as_deref());
    let read = item.read;

    let id_for_read = item.id.clone();
    let controller_for_read = controller.clone();
    let mark_read = move |_| {
        controller_for_read.perform_action(ControllerAction::MarkRead(id_for_read.clone()));
    };

    let id_for_dismiss = item.id.clone();
    let controller_for_dismiss = controller.clone();
    let dismiss = move |_| {
        controller_for_dismiss.perform_action(ControllerAction::Dismiss(id_for_dismiss.clone()));
    };

    view! {
        <div class=format!(
            "border-l-4 {} bg-gray-700 rounded-r-lg p-4 mb-3 {}",
            accent,
            if read { "opacity-60" } else { "" },
        )>
            <div class="flex items-start justify-between">
                <div class="flex-1">
                    <div class="flex items-center space-x-2">
                        <span class="font-medium">{item.title.clone()}</span>
                        <span class=format!("text-xs {}", accent)>{urgency_label}</span>
                    </div>
                    <p class="text-gray-300 text-sm mt-1">{item.message.clone()}</p>

                    <div class="flex items-center space-x-3 text-xs text-gray-400 mt-2">
                        {item.agent_name.clone().map(|agent| view! {
                            <span>{agent}</span>
                        })}
                        {time.map(|t| view! { <span>{t}</span> })}
                    </div>

                    // Server-defined action buttons; acting on one marks the
                    // notification read and lets the next refresh confirm
                    {(!item.action_buttons.is_empty()).then(|| {
                        let id = item.id.clone();
                        let controller = controller.clone();
                        view! {
                            <div class="flex flex-wrap gap-2 mt-3">
                                {item.action_buttons.iter().map(|button| {
                                    let id = id.clone();
                                    let controller = controller.clone();
                                    let action = button.action.clone();
                                    let label = button.label.clone();
                                    view! {
                                        <button
                                            on:click=move |_| {
                                                web_sys::console::log_1(
                                                    &format!("Notification action: {}", action).into(),
                                                );
                                                controller.perform_action(
                                                    ControllerAction::MarkRead(id.clone()),
                                                );
                                            }
                                            class="px-3 py-1 bg-gray-600 hover:bg-gray-500 rounded text-xs font-medium transition-colors"
                                        >
                                            {label}
                                        </button>
                                    }
                                }).collect_view()}
                            </div>
                        }
                    })}
                </div>

                <div class="flex items-center space-x-2 ml-4">
                    {(!read).then(|| view! {
                        <button
                            on:click=mark_read
                            class="text-gray-400 hover:text-white text-xs"
                            title="Mark as read"
                        >
                            "Mark read"
                        </button>
                    })}
                    <button
                        on:click=dismiss
                        class="text-gray-400 hover:text-white text-xs"
                        title="Dismiss"
                    >
                        "Dismiss"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::global::Urgency;

    fn item(id: &str, urgency: Urgency, created_at: &str, dismissed: bool) -> NotificationItem {
        NotificationItem {
            id: id.to_string(),
            title: "title".to_string(),
            message: "message".to_string(),
            urgency,
            agent_name: None,
            action_buttons: Vec::new(),
            created_at: Some(created_at.to_string()),
            read: false,
            dismissed,
        }
    }

    #[test]
    fn test_badge_shows_count_when_nonzero() {
        assert_eq!(badge_label(3), Some("3".to_string()));
        assert_eq!(badge_label(1), Some("1".to_string()));
    }

    #[test]
    fn test_badge_hidden_when_count_is_zero() {
        assert_eq!(badge_label(0), None);
    }

    #[test]
    fn test_dismissed_notifications_are_filtered() {
        let feed = NotificationFeed {
            items: vec![
                item("a", Urgency::High, "2026-08-29T10:00:00", false),
                item("b", Urgency::Critical, "2026-08-29T10:00:00", true),
            ],
            count: 2,
        };

        let visible = visible_notifications(&feed);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "a");
    }

    #[test]
    fn test_ordering_urgency_then_recency() {
        let feed = NotificationFeed {
            items: vec![
                item("old_critical", Urgency::Critical, "2026-08-28T09:00:00", false),
                item("low", Urgency::Low, "2026-08-29T12:00:00", false),
                item("new_critical", Urgency::Critical, "2026-08-29T09:00:00", false),
                item("medium", Urgency::Medium, "2026-08-29T11:00:00", false),
            ],
            count: 4,
        };

        let ids: Vec<String> = visible_notifications(&feed)
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["new_critical", "old_critical", "medium", "low"]);
    }

    #[test]
    fn test_display_time_parses_naive_iso() {
        assert_eq!(
            display_time(Some("2026-08-29T14:05:12.123456")),
            Some("Aug 29, 14:05".to_string())
        );
        assert_eq!(display_time(Some("not a timestamp")), None);
        assert_eq!(display_time(None), None);
    }
}
