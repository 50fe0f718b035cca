use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CashflowError;
use crate::rates::{annual_from_monthly, period_rate};
use crate::time_value::{irr_with_config, npv, SolverConfig};
use crate::types::{with_metadata, CashFlowSchedule, ComputationOutput, Money, Periodicity, Rate};
use crate::CashflowResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for a full schedule analysis: IRR plus present value at the
/// quoted discount rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleAnalysisInput {
    /// Whether cash flows and the solved IRR are per month or per year
    pub periodicity: Periodicity,
    /// Effective annual discount rate as a fraction (0.10 = 10%)
    pub annual_discount_rate: Rate,
    /// Initial investment, entered as a positive amount
    pub initial_investment: Money,
    /// Declared number of future periods
    pub num_periods: u32,
    /// Per-period cash flows; length must equal `num_periods`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_flows: Option<Vec<Money>>,
    /// Uniform amount broadcast to every period when `cash_flows` is absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uniform_cash_flow: Option<Money>,
    /// Starting guess for the root-finder (default: the period discount rate)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irr_guess: Option<Rate>,
    /// Solver tolerance override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<Decimal>,
    /// Solver iteration budget override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u32>,
}

/// Output of a schedule analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleAnalysisOutput {
    /// Periodicity the IRR and period rate are quoted against
    pub periodicity: Periodicity,
    /// Annual discount rate echoed back
    pub annual_discount_rate: Rate,
    /// Discount rate per period (converted for monthly schedules)
    pub period_discount_rate: Rate,
    /// Solved internal rate of return, per period
    pub irr: Rate,
    /// IRR restated as an effective annual rate (monthly schedules only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annualized_irr: Option<Rate>,
    /// Present value at the period discount rate (not at the IRR)
    pub present_value: Money,
    /// NPV residual at the solved IRR; should be ~0
    pub npv_at_irr: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Analyze a cash-flow schedule: validate, convert the quoted annual
/// rate to the schedule's periodicity, solve for IRR, and compute the
/// present value at the quoted discount rate.
///
/// The present value is deliberately discounted at the *input* rate
/// rather than the solved IRR, so the two results answer different
/// questions: "what rate breaks even" and "what is it worth at my rate".
pub fn analyze_schedule(
    input: &ScheduleAnalysisInput,
) -> CashflowResult<ComputationOutput<ScheduleAnalysisOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_analysis_input(input)?;

    // Count check comes before any numeric work
    let flows = resolve_flows(input)?;
    let schedule = CashFlowSchedule::new(input.initial_investment, flows)?;

    let discount_rate = period_rate(input.annual_discount_rate, input.periodicity);

    // Root-find seeded with the period discount rate unless overridden
    let guess = input.irr_guess.unwrap_or(discount_rate);
    let solver = resolve_solver(input);
    let series = schedule.as_npv_series();
    let irr = irr_with_config(&series, guess, &solver)?;

    let annualized_irr = match input.periodicity {
        Periodicity::Monthly => Some(annual_from_monthly(irr)),
        Periodicity::Annual => None,
    };

    let present_value = npv(discount_rate, &series)?;
    let npv_at_irr = npv(irr, &series)?;

    if schedule.initial_investment.is_zero() {
        warnings.push("Zero initial investment: IRR has no break-even interpretation".into());
    }
    if input.periodicity == Periodicity::Monthly && input.num_periods % 12 != 0 {
        warnings.push(format!(
            "Monthly schedule of {} periods does not cover whole years",
            input.num_periods
        ));
    }

    let output = ScheduleAnalysisOutput {
        periodicity: input.periodicity,
        annual_discount_rate: input.annual_discount_rate,
        period_discount_rate: discount_rate,
        irr,
        annualized_irr,
        present_value,
        npv_at_irr,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Newton-Raphson IRR; PV discounted at the quoted rate",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_analysis_input(input: &ScheduleAnalysisInput) -> CashflowResult<()> {
    if input.annual_discount_rate < Decimal::ZERO {
        return Err(CashflowError::InvalidInput {
            field: "annual_discount_rate".into(),
            reason: "Annual discount rate must be non-negative".into(),
        });
    }
    if input.initial_investment < Decimal::ZERO {
        return Err(CashflowError::InvalidInput {
            field: "initial_investment".into(),
            reason: "Initial investment must be non-negative".into(),
        });
    }
    if input.num_periods == 0 {
        return Err(CashflowError::InvalidInput {
            field: "num_periods".into(),
            reason: "Schedule requires at least one period".into(),
        });
    }
    if let Some(tol) = input.tolerance {
        if tol <= Decimal::ZERO {
            return Err(CashflowError::InvalidInput {
                field: "tolerance".into(),
                reason: "Solver tolerance must be positive".into(),
            });
        }
    }
    if let Some(max_iter) = input.max_iterations {
        if max_iter == 0 {
            return Err(CashflowError::InvalidInput {
                field: "max_iterations".into(),
                reason: "Solver iteration budget must be positive".into(),
            });
        }
    }
    Ok(())
}

fn resolve_flows(input: &ScheduleAnalysisInput) -> CashflowResult<Vec<Money>> {
    match (&input.cash_flows, input.uniform_cash_flow) {
        (Some(flows), _) => {
            if flows.len() != input.num_periods as usize {
                return Err(CashflowError::InvalidInput {
                    field: "cash_flows".into(),
                    reason: format!(
                        "Cash-flow count ({}) must equal the declared period count ({})",
                        flows.len(),
                        input.num_periods
                    ),
                });
            }
            Ok(flows.clone())
        }
        (None, Some(amount)) => Ok(vec![amount; input.num_periods as usize]),
        (None, None) => Err(CashflowError::InsufficientData(
            "Provide either cash_flows or uniform_cash_flow".into(),
        )),
    }
}

fn resolve_solver(input: &ScheduleAnalysisInput) -> SolverConfig {
    let defaults = SolverConfig::default();
    SolverConfig {
        tolerance: input.tolerance.unwrap_or(defaults.tolerance),
        max_iterations: input.max_iterations.unwrap_or(defaults.max_iterations),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
