//! Display formatting for view-model fields.
//!
//! These mirror the front-end formatters the position list renders with:
//! percentages with configurable precision and rounding, crypto balances
//! with magnitude-dependent precision, fiat balances with two decimals.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Format a percentage value with no decimal places, e.g. `180%`.
///
/// The input is the percent number itself, not a fraction.
pub fn format_percent(value: Decimal) -> String {
    format_percent_precision(value, 0)
}

/// Format a percentage value with the given number of decimal places,
/// rounding half away from zero, e.g. `1.00%`.
pub fn format_percent_precision(value: Decimal, precision: u32) -> String {
    let rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}%", precision as usize, rounded)
}

/// Format a percentage value with the given number of decimal places,
/// rounding toward zero.
pub fn format_percent_round_down(value: Decimal, precision: u32) -> String {
    let rounded = value.round_dp_with_strategy(precision, RoundingStrategy::ToZero);
    format!("{:.*}%", precision as usize, rounded)
}

/// Format a token amount.
///
/// Amounts of at least one token use two decimals with thousands
/// separators; smaller amounts keep four decimals; dust below 0.001
/// collapses to a floor marker.
pub fn format_crypto_balance(value: Decimal) -> String {
    let magnitude = value.abs();
    if !value.is_zero() && magnitude < dec!(0.001) {
        return "<0.001".to_string();
    }
    if magnitude < Decimal::ONE {
        let rounded = value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);
        return format!("{:.4}", rounded);
    }
    group_thousands(value, 2)
}

/// Format a USD amount with two decimals and thousands separators.
pub fn format_fiat_balance(value: Decimal) -> String {
    group_thousands(value, 2)
}

fn group_thousands(value: Decimal, precision: u32) -> String {
    let rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    let raw = format!("{:.*}", precision as usize, rounded);
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}
