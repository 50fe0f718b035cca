use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CashflowError;
use crate::CashflowResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Periodicity of a cash-flow schedule and the rates quoted against it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Periodicity {
    #[default]
    Monthly,
    Annual,
}

impl Periodicity {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Periodicity::Monthly => 12,
            Periodicity::Annual => 1,
        }
    }
}

/// An evenly-spaced cash-flow schedule: an initial outlay at period 0
/// followed by one signed amount per period. Period index = position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    /// Initial investment, entered as a positive amount
    pub initial_investment: Money,
    /// Future cash flows for periods 1..=N, in period order
    pub flows: Vec<Money>,
}

impl CashFlowSchedule {
    pub fn new(initial_investment: Money, flows: Vec<Money>) -> CashflowResult<Self> {
        if initial_investment < Decimal::ZERO {
            return Err(CashflowError::InvalidInput {
                field: "initial_investment".into(),
                reason: "Initial investment must be non-negative".into(),
            });
        }
        if flows.is_empty() {
            return Err(CashflowError::InsufficientData(
                "Schedule requires at least one future cash flow".into(),
            ));
        }
        Ok(Self {
            initial_investment,
            flows,
        })
    }

    /// Number of future periods (period 0 excluded).
    pub fn num_periods(&self) -> usize {
        self.flows.len()
    }

    /// The full series the solver and valuation consume:
    /// `[-initial_investment, cf_1, ..., cf_N]`.
    pub fn as_npv_series(&self) -> Vec<Money> {
        let mut series = Vec::with_capacity(self.flows.len() + 1);
        series.push(-self.initial_investment);
        series.extend_from_slice(&self.flows);
        series
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
