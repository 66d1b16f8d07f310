//! Dashboard Page
//!
//! The monitoring view: headline stats, fraud trends, and the live feed,
//! kept fresh by the poll loop while the view is on screen. Without a
//! token the view never starts polling; it redirects straight to login.

use leptos::*;
use leptos_router::{use_navigate, Redirect};

use crate::components::{CardSkeleton, ChartSkeleton, ListSkeleton, LiveFeed, StatCard, TrendChart};
use crate::state::dashboard::DashboardState;
use crate::state::poller::start_polling;
use crate::state::session::Session;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let session = use_context::<Session>().expect("Session not found");

    // No token, no dashboard
    if session.read().is_none() {
        return view! { <Redirect path="/login" /> }.into_view();
    }

    let state = DashboardState::new();
    provide_context(state.clone());

    let navigate = use_navigate();
    let handle = start_polling(state.clone(), session, move || {
        navigate("/login", Default::default());
    });
    on_cleanup(move || drop(handle));

    // Headline figures from the latest snapshot
    let state_for_total = state.clone();
    let total = create_memo(move |_| {
        state_for_total
            .stats
            .get()
            .map(|s| group_thousands(s.total_transactions))
            .unwrap_or_else(|| "—".to_string())
    });

    let state_for_fraud = state.clone();
    let fraud = create_memo(move |_| {
        state_for_fraud
            .stats
            .get()
            .map(|s| group_thousands(s.fraud_count))
            .unwrap_or_else(|| "—".to_string())
    });

    let state_for_rate = state.clone();
    let rate = create_memo(move |_| {
        state_for_rate
            .stats
            .get()
            .map(|s| format!("{:.2}%", s.fraud_percentage))
            .unwrap_or_else(|| "—".to_string())
    });

    let state_for_confidence = state.clone();
    let confidence = create_memo(move |_| {
        state_for_confidence
            .average_confidence()
            .map(|c| format!("{:.1}%", c))
            .unwrap_or_else(|| "—".to_string())
    });

    let state_for_trend = state.clone();
    let trend_label = create_memo(move |_| {
        let days = state_for_trend
            .stats
            .get()
            .map(|s| s.daily_stats.len())
            .unwrap_or(0);
        if days == 0 {
            String::new()
        } else if days == 1 {
            "Last day".to_string()
        } else {
            format!("Last {} days", days)
        }
    });

    let loading = state.loading;

    view! {
        <div class="container mx-auto px-4 py-8 space-y-8">
            <Header />

            // Headline stats
            {move || {
                if loading.get() {
                    view! {
                        <div class="grid grid-cols-2 lg:grid-cols-4 gap-4">
                            <CardSkeleton />
                            <CardSkeleton />
                            <CardSkeleton />
                            <CardSkeleton />
                        </div>
                    }.into_view()
                } else {
                    view! {
                        <div class="grid grid-cols-2 lg:grid-cols-4 gap-4">
                            <StatCard label="Total Transactions" value=total hint="all time" />
                            <StatCard label="Fraud Detected" value=fraud hint="flagged by the model" />
                            <StatCard label="Detection Rate" value=rate hint="share of all transactions" />
                            <StatCard label="Avg. Confidence" value=confidence hint="across the live feed" />
                        </div>
                    }.into_view()
                }
            }}

            // Trends and live feed
            <div class="grid lg:grid-cols-3 gap-8">
                <section class="lg:col-span-2 bg-gray-800 rounded-xl p-6">
                    <div class="flex items-center justify-between mb-4">
                        <h2 class="text-xl font-semibold">"Fraud Trends"</h2>
                        <span class="text-sm text-gray-400">{trend_label}</span>
                    </div>
                    {move || {
                        if loading.get() {
                            view! { <ChartSkeleton /> }.into_view()
                        } else {
                            view! { <TrendChart /> }.into_view()
                        }
                    }}
                </section>

                <section>
                    <h2 class="text-xl font-semibold mb-4">"Live Feed"</h2>
                    {move || {
                        if loading.get() {
                            view! { <ListSkeleton /> }.into_view()
                        } else {
                            view! { <LiveFeed /> }.into_view()
                        }
                    }}
                </section>
            </div>
        </div>
    }
    .into_view()
}

/// Dashboard header: branding, connectivity pill, refresh clock, sign-out
#[component]
fn Header() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let session = use_context::<Session>().expect("Session not found");
    let navigate = use_navigate();

    let error = state.error;
    let last_refresh = state.last_refresh;

    let sign_out = move |_| {
        session.clear();
        navigate("/login", Default::default());
    };

    view! {
        <div class="flex items-center justify-between">
            <div class="flex items-center space-x-3">
                <span class="text-4xl">"🛡️"</span>
                <div>
                    <h1 class="text-3xl font-bold">"Sentinel"</h1>
                    <p class="text-gray-400 mt-1">"Real-time fraud monitoring"</p>
                </div>
            </div>

            <div class="flex items-center space-x-4">
                // Connectivity pill
                {move || {
                    match error.get() {
                        Some(notice) => view! {
                            <span class="flex items-center space-x-2 text-amber-400 text-sm">
                                <span class="w-2 h-2 bg-amber-400 rounded-full" />
                                <span>{notice}</span>
                            </span>
                        }.into_view(),
                        None => view! {
                            <span class="flex items-center space-x-2 text-green-400 text-sm">
                                <span class="w-2 h-2 bg-green-400 rounded-full pulse" />
                                <span>"Live"</span>
                            </span>
                        }.into_view(),
                    }
                }}

                // Last refresh clock
                <span class="text-sm text-gray-400">
                    {move || {
                        last_refresh.get()
                            .and_then(|ts| chrono::DateTime::from_timestamp_millis(ts))
                            .map(|dt| format!("Updated {}", dt.format("%H:%M:%S")))
                            .unwrap_or_else(|| "Waiting for data".to_string())
                    }}
                </span>

                <button
                    on:click=sign_out
                    class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm font-medium transition-colors"
                >
                    "Sign Out"
                </button>
            </div>
        </div>
    }
}

/// Group a count with thousands separators for display
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
