//! Display formatting for monetary amounts.

use crate::ledger::amount::round_cents;

const GROUPING_SEPARATOR: char = ',';
const PRECISION: usize = 2;

/// Formats `value` as `-$1,234.50`: grouped thousands, two decimals, and a
/// leading minus before the symbol for negative values.
pub fn format_amount(value: f64, symbol: &str) -> String {
    let rounded = round_cents(value);
    let body = format_number(rounded.abs());
    if rounded < 0.0 {
        format!("-{symbol}{body}")
    } else {
        format!("{symbol}{body}")
    }
}

/// Formats a non-negative value with grouping and two decimals.
pub fn format_number(value: f64) -> String {
    let body = format!("{:.*}", PRECISION, value);
    match body.split_once('.') {
        Some((int_part, fraction)) => format!("{}.{}", group_digits(int_part), fraction),
        None => group_digits(&body),
    }
}

/// Formats a percentage with up to two decimals, trimming trailing zeros.
pub fn format_percentage(value: f64) -> String {
    let body = format!("{:.2}", round_cents(value));
    let trimmed = body.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}%")
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, GROUPING_SEPARATOR);
        }
        grouped.insert(0, ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_amount(1234.5, "$"), "$1,234.50");
        assert_eq!(format_amount(1_000_000.0, "€"), "€1,000,000.00");
        assert_eq!(format_amount(999.999, "$"), "$1,000.00");
        assert_eq!(format_amount(0.0, "$"), "$0.00");
    }

    #[test]
    fn negative_sign_leads_symbol() {
        assert_eq!(format_amount(-1234.5, "$"), "-$1,234.50");
        assert_eq!(format_amount(-0.001, "$"), "$0.00");
    }

    #[test]
    fn percentages_trim_zeros() {
        assert_eq!(format_percentage(56.0), "56%");
        assert_eq!(format_percentage(40.5), "40.5%");
        assert_eq!(format_percentage(33.333), "33.33%");
    }
}
