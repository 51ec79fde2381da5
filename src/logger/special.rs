//! Special logging functions for specific use cases

use super::tags::LogTag;
use crate::logger;
use colored::*;

/// Log the outcome of a single-token refresh with the price movement
///
/// Prices are pre-formatted display strings so this stays free of fixed-point
/// arithmetic; `old_display` is `None` when the row had no reading yet.
pub fn log_price_update(symbol: &str, address: &str, old_display: Option<&str>, new_display: &str) {
    let message = match old_display {
        Some(old) if old == new_display => {
            format!("{} {} unchanged at {}", "=".yellow(), symbol.bold(), new_display)
        }
        Some(old) => format!(
            "{} {} {} -> {}",
            "~".bright_cyan(),
            symbol.bold(),
            old.dimmed(),
            new_display.bright_white().bold()
        ),
        None => format!("{} {} {}", "+".green(), symbol.bold(), new_display.bright_white().bold()),
    };

    logger::info(LogTag::Prices, &format!("{} ({})", message, address));
}
