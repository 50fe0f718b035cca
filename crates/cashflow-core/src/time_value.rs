use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::CashflowError;
use crate::types::{CashFlowSchedule, Money, Rate};
use crate::CashflowResult;

/// Newton-Raphson convergence parameters.
///
/// Defaults mirror a standard library root-finder: absolute NPV
/// tolerance 1.48e-8, iteration budget 50.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    pub tolerance: Decimal,
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: dec!(0.0000000148),
            max_iterations: 50,
        }
    }
}

/// Net Present Value of a series of cash flows, index 0 at present.
pub fn npv(rate: Rate, cash_flows: &[Money]) -> CashflowResult<Money> {
    if rate <= dec!(-1) {
        return Err(CashflowError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }

    let mut result = Decimal::ZERO;
    let one_plus_r = Decimal::ONE + rate;
    let mut discount = Decimal::ONE;

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            discount *= one_plus_r;
        }
        if discount.is_zero() {
            return Err(CashflowError::DivisionByZero {
                context: format!("NPV discount factor at period {t}"),
            });
        }
        result += cf / discount;
    }

    Ok(result)
}

/// Present value of a schedule at a fixed discount rate:
/// `PV = -initial_investment + sum(cf_t / (1+r)^t)`.
pub fn present_value(schedule: &CashFlowSchedule, rate: Rate) -> CashflowResult<Money> {
    npv(rate, &schedule.as_npv_series())
}

/// Internal Rate of Return using Newton-Raphson with default convergence
/// parameters. Index 0 of `cash_flows` is the initial outlay (negative).
pub fn irr(cash_flows: &[Money], guess: Rate) -> CashflowResult<Rate> {
    irr_with_config(cash_flows, guess, &SolverConfig::default())
}

/// Internal Rate of Return using Newton-Raphson.
///
/// Non-convergence is reported as `ConvergenceFailure`, an ordinary
/// error value the caller branches on; the solver never panics on a
/// schedule with no finite root.
pub fn irr_with_config(
    cash_flows: &[Money],
    guess: Rate,
    config: &SolverConfig,
) -> CashflowResult<Rate> {
    if cash_flows.len() < 2 {
        return Err(CashflowError::InsufficientData(
            "IRR requires at least 2 cash flows".into(),
        ));
    }

    let mut rate = guess;

    for i in 0..config.max_iterations {
        let mut npv_val = Decimal::ZERO;
        let mut dnpv = Decimal::ZERO;
        let one_plus_r = Decimal::ONE + rate;

        for (t, cf) in cash_flows.iter().enumerate() {
            let t_dec = Decimal::from(t as i64);
            let discount = one_plus_r.powd(t_dec);
            if discount.is_zero() {
                continue;
            }
            npv_val += cf / discount;
            if t > 0 {
                dnpv -= t_dec * cf / (one_plus_r.powd(t_dec + Decimal::ONE));
            }
        }

        if npv_val.abs() < config.tolerance {
            return Ok(rate);
        }

        if dnpv.is_zero() {
            return Err(CashflowError::ConvergenceFailure {
                function: "IRR".into(),
                iterations: i,
                last_delta: npv_val,
            });
        }

        rate -= npv_val / dnpv;

        // Guard against divergence
        if rate < dec!(-0.99) {
            rate = dec!(-0.99);
        } else if rate > dec!(100.0) {
            rate = dec!(100.0);
        }
    }

    Err(CashflowError::ConvergenceFailure {
        function: "IRR".into(),
        iterations: config.max_iterations,
        last_delta: npv(rate, cash_flows).unwrap_or(Decimal::MAX),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_npv_basic() {
        let cfs = vec![dec!(-1000), dec!(300), dec!(400), dec!(500)];
        let result = npv(dec!(0.10), &cfs).unwrap();
        // NPV at 10%: -1000 + 300/1.1 + 400/1.21 + 500/1.331 ≈ -21.04
        assert!((result - dec!(-21.04)).abs() < dec!(1.0));
    }

    #[test]
    fn test_npv_zero_rate() {
        let cfs = vec![dec!(-100), dec!(50), dec!(50), dec!(50)];
        let result = npv(dec!(0.0), &cfs).unwrap();
        assert_eq!(result, dec!(50));
    }

    #[test]
    fn test_npv_rejects_rate_at_minus_one() {
        let cfs = vec![dec!(-100), dec!(50)];
        assert!(npv(dec!(-1), &cfs).is_err());
    }

    #[test]
    fn test_irr_basic() {
        let cfs = vec![dec!(-1000), dec!(400), dec!(400), dec!(400)];
        let result = irr(&cfs, dec!(0.10)).unwrap();
        // IRR should be ~9.7%
        assert!((result - dec!(0.097)).abs() < dec!(0.01));
    }

    #[test]
    fn test_irr_single_flow_exact() {
        // -1000 then 1100 one period later breaks even at exactly 10%
        let cfs = vec![dec!(-1000), dec!(1100)];
        let result = irr(&cfs, dec!(0.10)).unwrap();
        assert_eq!(result, dec!(0.10));
    }

    #[test]
    fn test_irr_requires_two_flows() {
        let result = irr(&[dec!(-1000)], dec!(0.10));
        assert!(matches!(result, Err(CashflowError::InsufficientData(_))));
    }

    #[test]
    fn test_irr_no_root_reports_convergence_failure() {
        // Zero outlay with positive flows: NPV > 0 for every rate > -1
        let cfs = vec![dec!(0), dec!(100), dec!(100), dec!(100)];
        let result = irr(&cfs, dec!(0.10));
        assert!(matches!(
            result,
            Err(CashflowError::ConvergenceFailure { .. })
        ));
    }

    #[test]
    fn test_irr_honours_iteration_budget() {
        let cfs = vec![dec!(0), dec!(100)];
        let config = SolverConfig {
            max_iterations: 3,
            ..SolverConfig::default()
        };
        match irr_with_config(&cfs, dec!(0.10), &config) {
            Err(CashflowError::ConvergenceFailure { iterations, .. }) => {
                assert!(iterations <= 3);
            }
            other => panic!("expected convergence failure, got {other:?}"),
        }
    }

    #[test]
    fn test_present_value_matches_npv_over_series() {
        let schedule =
            crate::types::CashFlowSchedule::new(dec!(1000), vec![dec!(500), dec!(600)]).unwrap();
        let direct = npv(dec!(0.05), &[dec!(-1000), dec!(500), dec!(600)]).unwrap();
        assert_eq!(present_value(&schedule, dec!(0.05)).unwrap(), direct);
    }

    #[test]
    fn test_irr_solution_zeroes_npv() {
        let cfs = vec![dec!(-10000), dec!(3000), dec!(4000), dec!(5000)];
        let r = irr(&cfs, dec!(0.10)).unwrap();
        let residual = npv(r, &cfs).unwrap();
        assert!(residual.abs() < dec!(0.000001), "residual {residual}");
    }
}
