//! Live Feed Component
//!
//! The most recent scored transactions, one row each.

use leptos::*;

use crate::state::dashboard::{DashboardState, Transaction};

/// Live transaction feed component
#[component]
pub fn LiveFeed() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");

    view! {
        <div class="space-y-2">
            {move || {
                let feed = state.transactions.get();

                if feed.is_empty() {
                    view! {
                        <p class="text-gray-400 text-sm">"No transactions yet"</p>
                    }.into_view()
                } else {
                    feed.into_iter()
                        .map(|tx| view! { <FeedRow tx=tx /> })
                        .collect_view()
                }
            }}
        </div>
    }
}

/// One row of the live feed
#[component]
fn FeedRow(tx: Transaction) -> impl IntoView {
    let (badge, badge_class) = if tx.is_fraud {
        ("Fraud", "bg-red-500/20 text-red-400")
    } else {
        ("Safe", "bg-green-500/20 text-green-400")
    };

    let time = format_event_time(tx.timestamp.as_deref());
    let amount = format!("${:.2}", tx.transaction_data.amount);
    let confidence = format!("{:.1}% confidence", tx.confidence * 100.0);

    view! {
        <div class="flex items-center justify-between py-3 px-4 bg-gray-800 rounded-lg border border-gray-700">
            <div class="flex items-center space-x-3">
                <span class=format!("px-2 py-1 rounded text-xs font-semibold {}", badge_class)>
                    {badge}
                </span>
                <div>
                    <div class="font-mono text-sm">{tx.transaction_id}</div>
                    <div class="text-gray-400 text-xs">{time}</div>
                </div>
            </div>
            <div class="text-right">
                <div class="font-semibold">{amount}</div>
                <div class="text-gray-400 text-xs">{confidence}</div>
            </div>
        </div>
    }
}

/// Wall-clock time of a feed event, from whichever timestamp shape the
/// API returned
fn format_event_time(timestamp: Option<&str>) -> String {
    let raw = match timestamp {
        Some(raw) => raw,
        None => return "N/A".to_string(),
    };

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format("%H:%M:%S").to_string();
    }

    // Some rows come without an offset
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%H:%M:%S").to_string();
    }

    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_event_time_rfc3339() {
        assert_eq!(
            format_event_time(Some("2024-01-15T10:30:45+00:00")),
            "10:30:45"
        );
    }

    #[test]
    fn test_format_event_time_without_offset() {
        assert_eq!(
            format_event_time(Some("2024-01-15T10:30:45.123456")),
            "10:30:45"
        );
        assert_eq!(format_event_time(Some("2024-01-15T10:30:45")), "10:30:45");
    }

    #[test]
    fn test_format_event_time_missing() {
        assert_eq!(format_event_time(None), "N/A");
    }

    #[test]
    fn test_format_event_time_unparseable_passes_through() {
        assert_eq!(format_event_time(Some("just now")), "just now");
    }
}
