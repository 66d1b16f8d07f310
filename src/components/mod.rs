//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod stat_card;
pub mod trend_chart;
pub mod feed;
pub mod loading;

pub use stat_card::StatCard;
pub use trend_chart::TrendChart;
pub use feed::LiveFeed;
pub use loading::{CardSkeleton, ChartSkeleton, ListSkeleton};
