//! Currency display for amounts shown in the checkout.
//!
//! Mirrors en-US currency formatting: a symbol for common currencies, the
//! upper-cased ISO code otherwise, comma thousands grouping, and the
//! currency's usual number of fraction digits.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currencies rendered without fraction digits.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &["JPY", "KRW", "VND", "CLP", "ISK", "HUF"];

fn symbol_for(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "INR" => Some("₹"),
        "KRW" => Some("₩"),
        "CAD" => Some("CA$"),
        "AUD" => Some("A$"),
        _ => None,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats `amount` in `currency_code` for display, e.g. `$1,200.00`.
///
/// An empty currency code renders the grouped number alone.
#[must_use]
pub fn format_amount(amount: Decimal, currency_code: &str) -> String {
    let code = currency_code.trim().to_uppercase();
    let (scale, precision) = if ZERO_DECIMAL_CURRENCIES.contains(&code.as_str()) {
        (0_u32, 0_usize)
    } else {
        (2, 2)
    };

    let rounded = amount.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let body = format!("{:.*}", precision, rounded.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body.as_str(), None),
    };

    let mut number = group_thousands(int_part);
    if let Some(frac) = frac_part {
        number.push('.');
        number.push_str(frac);
    }

    let sign = if negative { "-" } else { "" };
    if code.is_empty() {
        return format!("{sign}{number}");
    }
    match symbol_for(&code) {
        Some(symbol) => format!("{sign}{symbol}{number}"),
        None => format!("{sign}{code}\u{a0}{number}"),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn formats_usd_with_symbol_and_two_decimals() {
        assert_eq!(format_amount(dec("12"), "usd"), "$12.00");
        assert_eq!(format_amount(dec("12.5"), "USD"), "$12.50");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_amount(dec("1200"), "eur"), "€1,200.00");
        assert_eq!(format_amount(dec("1234567.891"), "gbp"), "£1,234,567.89");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_amount(dec("0.005"), "usd"), "$0.01");
    }

    #[test]
    fn zero_decimal_currency_has_no_fraction() {
        assert_eq!(format_amount(dec("1500.4"), "jpy"), "¥1,500");
    }

    #[test]
    fn unknown_currency_uses_code_prefix() {
        assert_eq!(format_amount(dec("5"), "pln"), "PLN\u{a0}5.00");
    }

    #[test]
    fn negative_amounts_keep_sign_before_symbol() {
        assert_eq!(format_amount(dec("-3.2"), "usd"), "-$3.20");
    }

    #[test]
    fn empty_currency_renders_number_only() {
        assert_eq!(format_amount(dec("999"), ""), "999.00");
    }
}
