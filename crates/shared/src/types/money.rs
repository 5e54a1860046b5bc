//! Money helpers.
//!
//! Amounts are `rust_decimal::Decimal` everywhere; floats never touch money.
//! Persisted amounts are quantized to kopecks to match `decimal(12,2)` columns.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits stored for money columns.
pub const MONEY_SCALE: u32 = 2;

/// Rounds an amount to kopecks, midpoint away from zero.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount with exactly two fractional digits (`1234.5` -> `"1234.50"`).
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let mut rounded = round_money(amount);
    rounded.rescale(MONEY_SCALE);
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(833.333333), dec!(833.33))]
    #[case(dec!(0.005), dec!(0.01))]
    #[case(dec!(-0.005), dec!(-0.01))]
    #[case(dec!(11200), dec!(11200))]
    fn test_round_money(#[case] input: Decimal, #[case] expected: Decimal) {
        assert_eq!(round_money(input), expected);
    }

    #[rstest]
    #[case(dec!(1234.5), "1234.50")]
    #[case(dec!(100833.333), "100833.33")]
    #[case(dec!(0), "0.00")]
    #[case(dec!(-12.345), "-12.35")]
    fn test_format_money(#[case] input: Decimal, #[case] expected: &str) {
        assert_eq!(format_money(input), expected);
    }
}
