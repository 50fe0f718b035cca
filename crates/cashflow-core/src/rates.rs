use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::types::{Periodicity, Rate};

/// Effective monthly rate equivalent to an effective annual rate:
/// `(1 + annual)^(1/12) - 1`. Valid for inputs greater than -100%.
pub fn monthly_from_annual(annual: Rate) -> Rate {
    (Decimal::ONE + annual).powd(Decimal::ONE / dec!(12)) - Decimal::ONE
}

/// Effective annual rate equivalent to an effective monthly rate:
/// `(1 + monthly)^12 - 1`.
pub fn annual_from_monthly(monthly: Rate) -> Rate {
    (Decimal::ONE + monthly).powi(12) - Decimal::ONE
}

/// The per-period discount rate implied by an annual rate: conversion
/// for monthly schedules, identity for annual ones.
pub fn period_rate(annual: Rate, periodicity: Periodicity) -> Rate {
    match periodicity {
        Periodicity::Monthly => monthly_from_annual(annual),
        Periodicity::Annual => annual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_from_annual_ten_percent() {
        // (1.10)^(1/12) - 1 ≈ 0.797414% per month
        let m = monthly_from_annual(dec!(0.10));
        assert!((m - dec!(0.0079741)).abs() < dec!(0.0000001), "got {m}");
    }

    #[test]
    fn test_annual_from_monthly_one_percent() {
        // (1.01)^12 - 1 ≈ 12.6825%
        let a = annual_from_monthly(dec!(0.01));
        assert!((a - dec!(0.126825)).abs() < dec!(0.000001), "got {a}");
    }

    #[test]
    fn test_round_trip_across_rate_range() {
        for a in [dec!(0), dec!(0.02), dec!(0.10), dec!(0.35), dec!(1), dec!(5)] {
            let back = annual_from_monthly(monthly_from_annual(a));
            assert!(
                (back - a).abs() < dec!(0.0000000001),
                "round trip drifted for {a}: {back}"
            );
        }
    }

    #[test]
    fn test_zero_rate_is_fixed_point() {
        assert_eq!(monthly_from_annual(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(annual_from_monthly(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_period_rate_identity_for_annual() {
        assert_eq!(period_rate(dec!(0.10), Periodicity::Annual), dec!(0.10));
        assert!(period_rate(dec!(0.10), Periodicity::Monthly) < dec!(0.10));
    }
}
