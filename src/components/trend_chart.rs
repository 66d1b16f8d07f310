//! Trend Chart Component
//!
//! Daily fraud counts as an area chart on HTML5 Canvas.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::dashboard::{DailyStat, DashboardState};

/// Line and fill colors for the fraud series
const LINE_COLOR: &str = "#3b82f6"; // blue-500
const FILL_COLOR: &str = "rgba(59, 130, 246, 0.18)";

/// Fraud trend chart component
#[component]
pub fn TrendChart() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw when a new snapshot lands
    create_effect(move |_| {
        let days = state
            .stats
            .get()
            .map(|s| s.daily_stats)
            .unwrap_or_default();

        if let Some(canvas) = canvas_ref.get() {
            draw_trend(&canvas, &days);
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width="800"
            height="320"
            class="w-full h-64 rounded-lg"
        />
    }
}

/// Draw the daily fraud counts on canvas
fn draw_trend(canvas: &HtmlCanvasElement, days: &[DailyStat]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins
    let margin_left = 48.0;
    let margin_right = 16.0;
    let margin_top = 16.0;
    let margin_bottom = 32.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    if days.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No trend data yet", width / 2.0 - 60.0, height / 2.0);
        return;
    }

    // Y scale: zero baseline up to the busiest day, with headroom
    let max_count = days.iter().map(|d| d.fraud_count).max().unwrap_or(0);
    let y_max = if max_count == 0 {
        1.0
    } else {
        max_count as f64 * 1.1
    };

    // Grid lines and y-axis labels
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);

    for i in 0..=4 {
        let y = margin_top + (i as f64 / 4.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = y_max - (i as f64 / 4.0) * y_max;
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&format!("{:.0}", value), 8.0, y + 4.0);
    }

    let x_at = |i: usize| -> f64 {
        if days.len() == 1 {
            margin_left + chart_width / 2.0
        } else {
            margin_left + (i as f64 / (days.len() - 1) as f64) * chart_width
        }
    };
    let y_at = |count: u64| -> f64 { margin_top + ((y_max - count as f64) / y_max) * chart_height };

    // Area fill under the series
    ctx.set_fill_style(&FILL_COLOR.into());
    ctx.begin_path();
    ctx.move_to(x_at(0), margin_top + chart_height);
    for (i, day) in days.iter().enumerate() {
        ctx.line_to(x_at(i), y_at(day.fraud_count));
    }
    ctx.line_to(x_at(days.len() - 1), margin_top + chart_height);
    ctx.close_path();
    ctx.fill();

    // Series line
    ctx.set_stroke_style(&LINE_COLOR.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, day) in days.iter().enumerate() {
        let x = x_at(i);
        let y = y_at(day.fraud_count);
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.stroke();

    // Points
    ctx.set_fill_style(&LINE_COLOR.into());
    for (i, day) in days.iter().enumerate() {
        ctx.begin_path();
        let _ = ctx.arc(
            x_at(i),
            y_at(day.fraud_count),
            3.0,
            0.0,
            std::f64::consts::PI * 2.0,
        );
        ctx.fill();
    }

    // X-axis labels: first, middle, and last day
    ctx.set_fill_style(&"#9ca3af".into());
    ctx.set_font("12px sans-serif");

    let label_indices = if days.len() > 2 {
        vec![0, days.len() / 2, days.len() - 1]
    } else {
        (0..days.len()).collect()
    };
    for i in label_indices {
        let _ = ctx.fill_text(&short_date(&days[i].date), x_at(i) - 16.0, height - 10.0);
    }
}

/// Shorten an ISO date to month-day for axis labels
fn short_date(date: &str) -> String {
    match date.split_once('-') {
        Some((_, rest)) => rest.to_string(),
        None => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_date_strips_year() {
        assert_eq!(short_date("2024-01-15"), "01-15");
    }

    #[test]
    fn test_short_date_passes_through_odd_input() {
        assert_eq!(short_date("today"), "today");
    }
}
