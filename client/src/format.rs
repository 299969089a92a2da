//! Human-readable rendering of values shown on the pages.

use common::DateTime;
use rust_decimal::{Decimal, RoundingStrategy};

/// Renders the provided `amount` as US dollars, like `$2,500,000.00`.
#[must_use]
pub fn price(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((&digits, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{cents}")
}

/// Renders the calendar date of the provided [`DateTime`], like
/// `June 15, 2023`.
#[must_use]
pub fn date(at: DateTime) -> String {
    at.to_long_date()
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::price;

    #[test]
    fn groups_thousands() {
        assert_eq!(price(Decimal::from(2_500_000)), "$2,500,000.00");
        assert_eq!(price(Decimal::from(850_000)), "$850,000.00");
        assert_eq!(price(Decimal::from(42_500)), "$42,500.00");
        assert_eq!(price(Decimal::from(999)), "$999.00");
        assert_eq!(price(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(price(Decimal::new(1_234_565, 3)), "$1,234.57");
        assert_eq!(price(Decimal::new(-5, 1)), "-$0.50");
        assert_eq!(price(Decimal::new(-1, 3)), "$0.00");
    }
}
