use serde_json::Value;

use super::{is_rate_key, render_rate};

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Priority list of key output fields
    let priority_keys = [
        "irr",
        "annualized_irr",
        "present_value",
        "npv",
        "period_discount_rate",
        "monthly_rate",
        "annual_rate",
    ];

    if let Value::Object(map) = result_obj {
        // Try priority keys first (skip null values)
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(key, val));
                    return;
                }
            }
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(key, val));
            return;
        }
    }

    println!("{}", format_minimal("", result_obj));
}

fn format_minimal(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) if is_rate_key(key) => render_rate(s),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
