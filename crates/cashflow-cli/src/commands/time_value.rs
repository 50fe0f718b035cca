use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use cashflow_core::rates;
use cashflow_core::time_value::{self, SolverConfig};

/// Arguments for a raw IRR solve
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct IrrArgs {
    /// Comma-separated series with the period-0 outlay first
    /// (e.g. "-1000,400,400,400")
    #[arg(long)]
    pub series: String,

    /// Starting guess for the root-finder
    #[arg(long, default_value = "0.1")]
    pub guess: Decimal,

    /// Solver tolerance override
    #[arg(long)]
    pub tolerance: Option<Decimal>,

    /// Solver iteration budget override
    #[arg(long)]
    pub max_iterations: Option<u32>,
}

/// Arguments for an NPV calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct NpvArgs {
    /// Comma-separated series with the period-0 outlay first
    #[arg(long)]
    pub series: String,

    /// Per-period discount rate as a fraction
    #[arg(long)]
    pub rate: Decimal,
}

/// Arguments for effective-rate conversion
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ConvertRateArgs {
    /// Effective annual rate to restate per month
    #[arg(long, conflicts_with = "monthly")]
    pub annual: Option<Decimal>,

    /// Effective monthly rate to restate per year
    #[arg(long)]
    pub monthly: Option<Decimal>,
}

pub fn run_irr(args: IrrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let series = parse_series(&args.series)?;
    let defaults = SolverConfig::default();
    let config = SolverConfig {
        tolerance: args.tolerance.unwrap_or(defaults.tolerance),
        max_iterations: args.max_iterations.unwrap_or(defaults.max_iterations),
    };

    let irr = time_value::irr_with_config(&series, args.guess, &config)?;

    Ok(serde_json::json!({
        "irr": irr.to_string(),
        "guess": args.guess.to_string(),
        "periods": series.len() - 1,
    }))
}

pub fn run_npv(args: NpvArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let series = parse_series(&args.series)?;
    let npv = time_value::npv(args.rate, &series)?;

    Ok(serde_json::json!({
        "npv": npv.to_string(),
        "rate": args.rate.to_string(),
        "periods": series.len() - 1,
    }))
}

pub fn run_convert_rate(args: ConvertRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    match (args.annual, args.monthly) {
        (Some(annual), None) => {
            let monthly = rates::monthly_from_annual(annual);
            Ok(serde_json::json!({
                "annual_rate": annual.to_string(),
                "monthly_rate": monthly.to_string(),
            }))
        }
        (None, Some(monthly)) => {
            let annual = rates::annual_from_monthly(monthly);
            Ok(serde_json::json!({
                "annual_rate": annual.to_string(),
                "monthly_rate": monthly.to_string(),
            }))
        }
        _ => Err("Provide exactly one of --annual or --monthly".into()),
    }
}

/// Parse a comma-separated cash-flow series into decimals.
pub fn parse_series(raw: &str) -> Result<Vec<Decimal>, Box<dyn std::error::Error>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Decimal::from_str(s).map_err(|e| format!("Invalid cash flow '{s}': {e}").into())
        })
        .collect()
}
