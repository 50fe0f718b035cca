use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{is_rate_key, render_rate};

/// Format output as a table using the tabled crate.
///
/// Analysis results arrive wrapped in an envelope with `result`,
/// `warnings`, and `methodology`; bare objects (irr, npv, convert-rate)
/// render as a flat field/value table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_field_table(map);
            }
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    if let Value::Object(res_map) = result {
        print_field_table(res_map);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_field_table(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_field(key, val)]);
    }
    let table = Table::from(builder);
    println!("{}", table);
}

fn format_field(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) if is_rate_key(key) => render_rate(s),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr
                .iter()
                .map(|v| format_field("", v))
                .collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
