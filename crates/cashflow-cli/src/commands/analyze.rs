use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use cashflow_core::analysis::{analyze_schedule, ScheduleAnalysisInput};
use cashflow_core::types::Periodicity;

use crate::input;

#[derive(Debug, Clone, ValueEnum)]
pub enum PeriodicityArg {
    Monthly,
    Annual,
}

impl From<PeriodicityArg> for Periodicity {
    fn from(value: PeriodicityArg) -> Self {
        match value {
            PeriodicityArg::Monthly => Periodicity::Monthly,
            PeriodicityArg::Annual => Periodicity::Annual,
        }
    }
}

/// Arguments for a full schedule analysis
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AnalyzeArgs {
    /// Periodicity of the schedule
    #[arg(long, value_enum, default_value = "monthly")]
    pub periodicity: PeriodicityArg,

    /// Effective annual discount rate as a fraction (e.g. 0.10 for 10%)
    #[arg(long, alias = "rate")]
    pub annual_discount_rate: Option<Decimal>,

    /// Initial investment, entered as a positive amount
    #[arg(long)]
    pub initial_investment: Option<Decimal>,

    /// Number of future periods
    #[arg(long)]
    pub periods: Option<u32>,

    /// Uniform cash flow broadcast to every period
    #[arg(long)]
    pub cash_flow: Option<Decimal>,

    /// Comma-separated per-period cash flows (overrides --cash-flow)
    #[arg(long)]
    pub cash_flows: Option<String>,

    /// Starting guess for the root-finder (default: the period discount rate)
    #[arg(long)]
    pub guess: Option<Decimal>,

    /// Solver tolerance override
    #[arg(long)]
    pub tolerance: Option<Decimal>,

    /// Solver iteration budget override
    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let analysis_input: ScheduleAnalysisInput = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let cash_flows = args
            .cash_flows
            .as_deref()
            .map(super::time_value::parse_series)
            .transpose()?;

        // --periods may be omitted when an explicit list pins the count
        let num_periods = match (&cash_flows, args.periods) {
            (_, Some(n)) => n,
            (Some(flows), None) => flows.len() as u32,
            (None, None) => return Err("--periods is required (or provide --input)".into()),
        };

        ScheduleAnalysisInput {
            periodicity: args.periodicity.into(),
            annual_discount_rate: args
                .annual_discount_rate
                .ok_or("--annual-discount-rate is required (or provide --input)")?,
            initial_investment: args
                .initial_investment
                .ok_or("--initial-investment is required (or provide --input)")?,
            num_periods,
            cash_flows,
            uniform_cash_flow: args.cash_flow,
            irr_guess: args.guess,
            tolerance: args.tolerance,
            max_iterations: args.max_iterations,
        }
    };

    let result = analyze_schedule(&analysis_input)?;
    Ok(serde_json::to_value(result)?)
}
