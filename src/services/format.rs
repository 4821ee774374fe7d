//! Display formatting for amounts and bucket labels

use chrono::NaiveDate;

use crate::types::Granularity;

/// Format an integer with thousand separators (e.g., 1234567 -> "1,234,567")
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let len = s.len();
    let mut result = String::with_capacity(len + len / 3);

    // Digits are ASCII, so byte indexing is safe
    for (i, ch) in s.bytes().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch as char);
    }

    result
}

/// Format an amount with thousand separators.
/// Whole amounts print without decimals, anything else with two.
/// Example: 1234.0 → "1,234", 1234.5 → "1,234.50"
pub fn format_amount(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = format_number(cents / 100);
    match cents % 100 {
        0 => format!("{}{}", sign, whole),
        frac => format!("{}{}.{:02}", sign, whole, frac),
    }
}

/// Format an amount prefixed with the currency label (e.g., "THB 1,234")
pub fn format_money(currency: &str, amount: f64) -> String {
    format!("{} {}", currency, format_amount(amount))
}

/// Human-readable label for the bucket starting at `start`
pub fn bucket_label(granularity: Granularity, start: NaiveDate) -> String {
    match granularity {
        Granularity::Daily => start.format("%b %-d, %Y").to_string(),
        Granularity::Weekly => format!("Week of {}", start.format("%b %-d, %Y")),
        Granularity::Monthly => start.format("%b %Y").to_string(),
    }
}

/// Percentage share of `part` in `whole` (0 when `whole` is not positive)
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Bar scaled against the largest value in view
pub fn format_sparkline(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || width == 0 {
        return "░".repeat(width);
    }
    let ratio = (value / max).max(0.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let empty = width.saturating_sub(filled);
    format!("{}{}", "▓".repeat(filled), "░".repeat(empty))
}

/// Bar for a share of the total, `percent` in 0..=100
pub fn format_percentage_bar(percent: f64, width: usize) -> String {
    let filled = (((percent / 100.0) * width as f64).round().max(0.0) as usize).min(width);
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
