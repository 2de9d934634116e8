//! Loading Component
//!
//! Skeleton states shown while a resource is pending its first fetch.

use leptos::*;

/// Skeleton loader for the account card grid
#[component]
pub fn CardSkeleton() -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 animate-pulse">
            <div class="h-3 bg-gray-700 rounded w-1/4 mb-3" />
            <div class="h-4 bg-gray-700 rounded w-1/2 mb-2" />
            <div class="h-8 bg-gray-700 rounded w-2/3" />
        </div>
    }
}

/// Skeleton loader for list panels
#[component]
pub fn ListSkeleton(
    #[prop(default = 3)]
    count: usize,
) -> impl IntoView {
    view! {
        <div class="space-y-3 animate-pulse">
            {(0..count).map(|_| view! {
                <div class="bg-gray-700 rounded h-12" />
            }).collect_view()}
        </div>
    }
}
