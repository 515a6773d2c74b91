use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
///
/// Simulation reports emit their line items as rows; everything else
/// falls back to two-column field/value output.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                match result.get("items") {
                    Some(Value::Array(items)) if !items.is_empty() => {
                        write_array_csv(&mut wtr, items);
                    }
                    _ => write_object_csv(&mut wtr, result),
                }
            } else {
                write_object_csv(&mut wtr, value);
            }
        }
        Value::Array(arr) => {
            write_array_csv(&mut wtr, arr);
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_object_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, value: &Value) {
    if let Value::Object(map) = value {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in map {
            let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
        }
    } else {
        let _ = wtr.write_record([&format_csv_value(value)]);
    }
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    // Header row comes from the first record; rows share its column order.
    let headers: Vec<&str> = match arr.first() {
        Some(Value::Object(first)) => first.keys().map(String::as_str).collect(),
        _ => {
            for item in arr {
                let _ = wtr.write_record([&format_csv_value(item)]);
            }
            return;
        }
    };

    let _ = wtr.write_record(&headers);
    for item in arr {
        let row: Vec<String> = headers.iter().map(|h| csv_field(item, h)).collect();
        let _ = wtr.write_record(&row);
    }
}

fn csv_field(item: &Value, key: &str) -> String {
    item.get(key).map(format_csv_value).unwrap_or_default()
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        nested => serde_json::to_string(nested).unwrap_or_default(),
    }
}
