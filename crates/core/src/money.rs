//! Money display helpers.
//!
//! Amounts are carried as exact [`Decimal`] values through every calculation.
//! Rounding to two places happens only at display time, half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places shown for monetary values.
pub const MONEY_SCALE: u32 = 2;

/// Round an amount to paise, half away from zero (16.905 -> 16.91).
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Render an amount with exactly two decimals and no currency symbol.
pub fn format_money(amount: Decimal) -> String {
    round_money(amount).to_string()
}

/// Render a percentage without trailing zeros ("5%", "2.5%").
pub fn format_rate(rate_pct: Decimal) -> String {
    format!("{}%", rate_pct.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn midpoint_rounds_away_from_zero() {
        assert_eq!(format_money(dec!(16.905)), "16.91");
        assert_eq!(format_money(dec!(355.005)), "355.01");
        assert_eq!(format_money(dec!(16.904)), "16.90");
    }

    #[test]
    fn whole_amounts_are_padded() {
        assert_eq!(format_money(dec!(710)), "710.00");
        assert_eq!(format_money(dec!(0.5)), "0.50");
        assert_eq!(format_money(Decimal::ZERO), "0.00");
    }

    #[test]
    fn rates_drop_trailing_zeros() {
        assert_eq!(format_rate(dec!(5.00)), "5%");
        assert_eq!(format_rate(dec!(2.50)), "2.5%");
        assert_eq!(format_rate(dec!(12)), "12%");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: rounding never moves an amount by more than half a paisa.
        #[test]
        fn rounding_stays_within_half_paisa(mantissa in 0i64..10_000_000_000i64, scale in 0u32..6) {
            let amount = Decimal::new(mantissa, scale);
            let rounded = round_money(amount);
            prop_assert!((rounded - amount).abs() <= dec!(0.005));
            prop_assert_eq!(rounded.scale(), MONEY_SCALE);
        }
    }
}
