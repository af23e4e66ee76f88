use rust_i18n::t;

/// Formats a player's rating for display, "N/A" when unrated.
///
/// Integral ratings print without a fractional part, so `1500.0` renders as
/// `1500`.
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(value) if value.is_finite() => format!("{}", value),
        _ => t!("search.unrated").to_string(),
    }
}

/// A navigation link is active when its target equals the current path exactly.
pub fn is_active_link(href: &str, current_path: &str) -> bool {
    href == current_path
}
