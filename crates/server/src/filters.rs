//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Number of stars drawn for a rating.
const STAR_SLOTS: i64 = 5;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Renders a rating as a bar of filled and empty stars.
///
/// Ratings outside `0..=5` are clamped for display only; non-numeric input
/// renders as all empty.
///
/// Usage in templates: `{{ feedback.rating|stars }}`
#[askama::filter_fn]
pub fn stars(rating: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(star_bar(&rating.to_string()))
}

fn star_bar(rating: &str) -> String {
    let filled = rating.trim().parse::<i64>().unwrap_or(0).clamp(0, STAR_SLOTS);
    (0..STAR_SLOTS)
        .map(|i| if i < filled { '★' } else { '☆' })
        .collect()
}
