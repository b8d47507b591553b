//! Presentation formatting. Every helper takes values by reference or copy
//! and returns a fresh string; stored state is never touched.

use time::Month;

use crate::{calendar_date, NOT_AVAILABLE};

const SPARK_BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Two decimals, no unit: `14.5` → `14.50`.
pub fn fixed2(value: f64) -> String {
    format!("{value:.2}")
}

/// Dollar amount with two decimals: `189.8` → `$189.80`.
pub fn format_price(value: f64) -> String {
    format!("${value:.2}")
}

/// Billions with two decimals: `2_500_000_000` → `$2.50B`.
pub fn format_market_cap(value: f64) -> String {
    format!("${:.2}B", value / 1e9)
}

/// Fraction as a percentage: `0.005` → `0.50%`.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// `+1.25 (0.66%)`; the plus sign is shown for zero as well.
pub fn format_change(change: f64, change_percent: f64) -> String {
    let sign = if change >= 0.0 { "+" } else { "" };
    format!("{sign}{change:.2} ({change_percent:.2}%)")
}

/// Uppercase the first character, keep the rest as is.
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `value`, or `N/A` when it is blank.
pub fn or_not_available(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}

/// Short month/day chart label: `2024-01-05` → `Jan 5`.
///
/// Unrecognized input is passed through (or `N/A` when blank) so the point
/// keeps its position on the chart.
pub fn short_date_label(date: &str) -> String {
    match calendar_date(date) {
        Some(date) => format!("{} {}", month_abbrev(date.month()), date.day()),
        None => or_not_available(date).to_owned(),
    }
}

/// One-line block chart of `values`, scaled between their min and max.
pub fn sparkline(values: &[f64]) -> String {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    let span = max - min;
    let top = (SPARK_BARS.len() - 1) as f64;

    values
        .iter()
        .map(|value| {
            let level = if span > 0.0 {
                ((value - min) / span * top).round() as usize
            } else {
                SPARK_BARS.len() / 2
            };
            SPARK_BARS[level.min(SPARK_BARS.len() - 1)]
        })
        .collect()
}

const fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_cap_renders_in_billions() {
        assert_eq!(format_market_cap(2_500_000_000.0), "$2.50B");
        assert_eq!(format_market_cap(0.0), "$0.00B");
    }

    #[test]
    fn prices_have_two_decimals() {
        assert_eq!(format_price(189.8), "$189.80");
        assert_eq!(fixed2(31.456), "31.46");
        assert_eq!(format_percent(0.005), "0.50%");
    }

    #[test]
    fn change_shows_plus_for_zero_and_gains() {
        assert_eq!(format_change(0.0, 0.0), "+0.00 (0.00%)");
        assert_eq!(format_change(-1.5, -0.75), "-1.50 (-0.75%)");
    }

    #[test]
    fn capitalizes_first_letter_only() {
        assert_eq!(capitalize("positive"), "Positive");
        assert_eq!(capitalize("mIXED"), "MIXED");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn short_labels_use_month_and_day() {
        assert_eq!(short_date_label("2024-01-01"), "Jan 1");
        assert_eq!(short_date_label("2023-12-29 00:00:00-05:00"), "Dec 29");
        assert_eq!(short_date_label("last week"), "last week");
        assert_eq!(short_date_label(""), "N/A");
    }

    #[test]
    fn sparkline_spans_lowest_to_highest_bar() {
        assert_eq!(sparkline(&[1.0, 2.0, 3.0]), "▁▅█");
        assert_eq!(sparkline(&[5.0, 5.0]), "▅▅");
        assert_eq!(sparkline(&[]), "");
    }
}
