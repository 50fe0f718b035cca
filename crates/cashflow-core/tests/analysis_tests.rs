use cashflow_core::analysis::{analyze_schedule, ScheduleAnalysisInput};
use cashflow_core::rates::{annual_from_monthly, monthly_from_annual};
use cashflow_core::types::Periodicity;
use cashflow_core::CashflowError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Rate conversion — round trip
// ===========================================================================

#[test]
fn test_rate_conversion_round_trip() {
    for a in [
        dec!(0),
        dec!(0.01),
        dec!(0.10),
        dec!(0.50),
        dec!(1),
        dec!(2.5),
        dec!(5),
    ] {
        let back = annual_from_monthly(monthly_from_annual(a));
        assert!(
            (back - a).abs() < dec!(0.0000000001),
            "round trip drifted for {a}: {back}"
        );
    }
}

// ===========================================================================
// Schedule analysis — reference scenarios
// ===========================================================================

fn monthly_uniform_scenario() -> ScheduleAnalysisInput {
    // 10,000 outlay, 500/month for a year, 10% annual discount rate
    ScheduleAnalysisInput {
        periodicity: Periodicity::Monthly,
        annual_discount_rate: dec!(0.10),
        initial_investment: dec!(10000),
        num_periods: 12,
        cash_flows: None,
        uniform_cash_flow: Some(dec!(500)),
        irr_guess: None,
        tolerance: None,
        max_iterations: None,
    }
}

#[test]
fn test_monthly_uniform_scenario_rates() {
    let result = analyze_schedule(&monthly_uniform_scenario()).unwrap();
    let out = &result.result;

    // Monthly discount rate: (1.10)^(1/12) - 1 ≈ 0.7974%
    assert!(
        (out.period_discount_rate - dec!(0.0079741)).abs() < dec!(0.0000001),
        "monthly discount rate {}",
        out.period_discount_rate
    );

    // Only 6,000 comes back on 10,000 invested: monthly IRR ≈ -7.10%
    assert!((out.irr + dec!(0.071)).abs() < dec!(0.001), "irr {}", out.irr);

    // Annualized IRR restates the monthly one
    let annualized = out.annualized_irr.expect("monthly schedules annualize");
    assert!(
        (annualized - annual_from_monthly(out.irr)).abs() < dec!(0.0000000001),
        "annualized {annualized}"
    );
    assert!((annualized + dec!(0.587)).abs() < dec!(0.005));
}

#[test]
fn test_monthly_uniform_scenario_pv_uses_discount_rate() {
    let result = analyze_schedule(&monthly_uniform_scenario()).unwrap();
    let out = &result.result;

    // PV at the monthly discount rate (not the IRR):
    // 500 * (1 - 1.10^-1) / 0.0079741... - 10000 ≈ -4299.73
    assert!(
        (out.present_value + dec!(4299.73)).abs() < dec!(0.5),
        "pv {}",
        out.present_value
    );

    // The residual at the IRR is ~0 by construction, so the two rates
    // produce visibly different valuations
    assert!(out.npv_at_irr.abs() < dec!(0.000001));
    assert!((out.present_value - out.npv_at_irr).abs() > dec!(4000));
}

#[test]
fn test_zero_outlay_scenario() {
    // PV of [100, 100, 100] at 0% is exactly 300; IRR has no finite root
    let mut input = monthly_uniform_scenario();
    input.periodicity = Periodicity::Annual;
    input.annual_discount_rate = Decimal::ZERO;
    input.initial_investment = Decimal::ZERO;
    input.num_periods = 3;
    input.cash_flows = Some(vec![dec!(100), dec!(100), dec!(100)]);
    input.uniform_cash_flow = None;

    match analyze_schedule(&input) {
        Err(CashflowError::ConvergenceFailure { function, .. }) => assert_eq!(function, "IRR"),
        other => panic!("expected convergence failure, got {other:?}"),
    }

    // The PV half of the scenario, checked through the valuation path
    let schedule =
        cashflow_core::types::CashFlowSchedule::new(Decimal::ZERO, vec![dec!(100); 3]).unwrap();
    let pv = cashflow_core::time_value::present_value(&schedule, Decimal::ZERO).unwrap();
    assert_eq!(pv, dec!(300));
}

#[test]
fn test_annual_single_period_scenario() {
    // 1,000 out, 1,100 back in one year: IRR is exactly 10% and the PV
    // at a 10% discount rate is exactly zero
    let input = ScheduleAnalysisInput {
        periodicity: Periodicity::Annual,
        annual_discount_rate: dec!(0.10),
        initial_investment: dec!(1000),
        num_periods: 1,
        cash_flows: Some(vec![dec!(1100)]),
        uniform_cash_flow: None,
        irr_guess: Some(dec!(0.10)),
        tolerance: None,
        max_iterations: None,
    };

    let result = analyze_schedule(&input).unwrap();
    let out = &result.result;

    assert_eq!(out.irr, dec!(0.10));
    assert_eq!(out.present_value, Decimal::ZERO);
    assert!(out.annualized_irr.is_none());
    assert_eq!(out.period_discount_rate, dec!(0.10));
}

// ===========================================================================
// Validation ordering and error taxonomy
// ===========================================================================

#[test]
fn test_count_mismatch_detected_before_solving() {
    let mut input = monthly_uniform_scenario();
    // A schedule that would otherwise fail to converge; the count check
    // must fire first
    input.initial_investment = Decimal::ZERO;
    input.cash_flows = Some(vec![dec!(500); 11]);
    input.uniform_cash_flow = None;

    match analyze_schedule(&input) {
        Err(CashflowError::InvalidInput { field, reason }) => {
            assert_eq!(field, "cash_flows");
            assert!(reason.contains("11"));
            assert!(reason.contains("12"));
        }
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_mismatch_and_nonconvergence_render_distinct_messages() {
    let mismatch = CashflowError::InvalidInput {
        field: "cash_flows".into(),
        reason: "Cash-flow count (11) must equal the declared period count (12)".into(),
    };
    let no_converge = CashflowError::ConvergenceFailure {
        function: "IRR".into(),
        iterations: 50,
        last_delta: dec!(1),
    };
    let a = mismatch.to_string();
    let b = no_converge.to_string();
    assert!(a.contains("cash_flows"));
    assert!(b.contains("did not converge"));
    assert_ne!(a, b);
}

#[test]
fn test_uniform_broadcast_matches_explicit_flows() {
    let uniform = analyze_schedule(&monthly_uniform_scenario()).unwrap();

    let mut explicit_input = monthly_uniform_scenario();
    explicit_input.cash_flows = Some(vec![dec!(500); 12]);
    explicit_input.uniform_cash_flow = None;
    let explicit = analyze_schedule(&explicit_input).unwrap();

    assert_eq!(uniform.result.irr, explicit.result.irr);
    assert_eq!(uniform.result.present_value, explicit.result.present_value);
}
