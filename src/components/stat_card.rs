//! Stat Card Component
//!
//! Displays one headline figure from the latest statistics snapshot.

use leptos::*;

/// Stat card component
#[component]
pub fn StatCard(
    /// Label above the figure
    #[prop(into)]
    label: String,
    /// Formatted figure to display
    #[prop(into)]
    value: Signal<String>,
    /// Optional context line under the figure
    #[prop(optional)]
    hint: Option<&'static str>,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-6 border border-gray-700">
            <div class="text-gray-400 text-sm">{label}</div>
            <div class="text-3xl font-bold mt-2">{move || value.get()}</div>
            {hint.map(|h| view! {
                <div class="text-gray-500 text-xs mt-2">{h}</div>
            })}
        </div>
    }
}
