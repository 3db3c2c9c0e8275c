//! Utility functions for formatting and common operations
//!
//! Centralized display formatting so every renderer shows currency,
//! quantities, and percentages the same way.

use rust_decimal::Decimal;

/// Format a KRW amount with the won sign and thousands separators,
/// rounded to whole won.
///
/// # Examples
/// ```
/// use tradeboard::utils::format_krw;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_krw(dec!(1234567)), "₩1,234,567");
/// assert_eq!(format_krw(dec!(-500.4)), "-₩500");
/// ```
pub fn format_krw(value: Decimal) -> String {
    let is_negative = value < Decimal::ZERO;
    let rounded = value.abs().round();

    let digits = rounded.to_string();
    let with_separators: String = digits
        .chars()
        .rev()
        .enumerate()
        .flat_map(|(i, c)| {
            if i > 0 && i % 3 == 0 {
                vec![',', c]
            } else {
                vec![c]
            }
        })
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    if is_negative {
        format!("-₩{}", with_separators)
    } else {
        format!("₩{}", with_separators)
    }
}

/// Format a BTC quantity at 6 decimal places.
pub fn format_btc(value: Decimal) -> String {
    format!("{:.6} BTC", value)
}

/// Format a percentage at 2 decimal places, without sign padding.
pub fn format_pct(value: Decimal) -> String {
    format!("{:.2} %", value)
}

/// Format a percentage delta with an explicit sign, at 2 decimal places.
pub fn format_pct_delta(value: Decimal) -> String {
    if value >= Decimal::ZERO {
        format!("+{:.2} %", value)
    } else {
        format!("{:.2} %", value)
    }
}
