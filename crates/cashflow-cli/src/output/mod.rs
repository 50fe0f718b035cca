pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Keys whose values are per-period or annual rates expressed as fractions.
/// Table and minimal output restate these as percentages.
pub(crate) fn is_rate_key(key: &str) -> bool {
    key == "irr"
        || key == "annualized_irr"
        || key.ends_with("_rate")
        || key == "guess"
}

/// Render a fraction-valued field with a percentage restatement,
/// e.g. "-0.0710 (-7.10%)". Non-numeric strings pass through unchanged.
pub(crate) fn render_rate(raw: &str) -> String {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    match Decimal::from_str(raw) {
        Ok(d) => {
            let pct = (d * dec!(100)).round_dp(4).normalize();
            format!("{} ({}%)", raw, pct)
        }
        Err(_) => raw.to_string(),
    }
}
