use serde_json::Value;
use std::io;

/// Write output as two-column CSV (field, value) to stdout.
///
/// For enveloped analysis output only the `result` section is emitted;
/// warnings and methodology are presentation detail, not data.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let data = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match data {
        Value::Object(map) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in map {
                let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
            }
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(data)]);
        }
    }

    let _ = wtr.flush();
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
