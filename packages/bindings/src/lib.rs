use std::str::FromStr;

use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_rate(raw: &str) -> NapiResult<Decimal> {
    Decimal::from_str(raw.trim()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Schedule analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_schedule(input_json: String) -> NapiResult<String> {
    let input: cashflow_core::analysis::ScheduleAnalysisInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = cashflow_core::analysis::analyze_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Time value
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
struct IrrBindingInput {
    cash_flows: Vec<Decimal>,
    guess: Option<Decimal>,
    tolerance: Option<Decimal>,
    max_iterations: Option<u32>,
}

#[napi]
pub fn solve_irr(input_json: String) -> NapiResult<String> {
    let binding_input: IrrBindingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;

    let defaults = cashflow_core::time_value::SolverConfig::default();
    let config = cashflow_core::time_value::SolverConfig {
        tolerance: binding_input.tolerance.unwrap_or(defaults.tolerance),
        max_iterations: binding_input
            .max_iterations
            .unwrap_or(defaults.max_iterations),
    };
    let guess = binding_input.guess.unwrap_or_else(|| Decimal::new(1, 1));

    let irr =
        cashflow_core::time_value::irr_with_config(&binding_input.cash_flows, guess, &config)
            .map_err(to_napi_error)?;
    Ok(irr.to_string())
}

#[derive(serde::Deserialize)]
struct NpvBindingInput {
    rate: Decimal,
    cash_flows: Vec<Decimal>,
}

#[napi]
pub fn net_present_value(input_json: String) -> NapiResult<String> {
    let binding_input: NpvBindingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let npv = cashflow_core::time_value::npv(binding_input.rate, &binding_input.cash_flows)
        .map_err(to_napi_error)?;
    Ok(npv.to_string())
}

// ---------------------------------------------------------------------------
// Rate conversion
// ---------------------------------------------------------------------------

#[napi]
pub fn monthly_from_annual(annual_rate: String) -> NapiResult<String> {
    let annual = parse_rate(&annual_rate)?;
    Ok(cashflow_core::rates::monthly_from_annual(annual).to_string())
}

#[napi]
pub fn annual_from_monthly(monthly_rate: String) -> NapiResult<String> {
    let monthly = parse_rate(&monthly_rate)?;
    Ok(cashflow_core::rates::annual_from_monthly(monthly).to_string())
}
