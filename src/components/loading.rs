//! Loading Component
//!
//! Skeleton states shown until the first poll cycle lands.

use leptos::*;

/// Skeleton loader for stat cards
#[component]
pub fn CardSkeleton() -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-6 animate-pulse">
            <div class="h-4 bg-gray-700 rounded w-1/2 mb-4" />
            <div class="h-8 bg-gray-700 rounded w-2/3" />
        </div>
    }
}

/// Skeleton loader for the trend chart
#[component]
pub fn ChartSkeleton() -> impl IntoView {
    view! {
        <div class="animate-pulse">
            <div class="h-64 bg-gray-700 rounded-lg" />
        </div>
    }
}

/// Skeleton loader for the live feed
#[component]
pub fn ListSkeleton(
    #[prop(default = 5)]
    count: usize,
) -> impl IntoView {
    view! {
        <div class="space-y-3 animate-pulse">
            {(0..count).map(|_| view! {
                <div class="bg-gray-700 rounded h-14" />
            }).collect_view()}
        </div>
    }
}
