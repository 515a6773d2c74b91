use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_report_table(result, map),
            None => print_kv_table(map),
        },
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

/// Simulation reports carry line items and a summary; each gets its own
/// table, followed by the envelope trailers.
fn print_report_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    let mut printed = false;

    if let Some(Value::Array(items)) = result.get("items") {
        if !items.is_empty() {
            println!("Items:");
            print_array_table(items);
            printed = true;
        }
    }

    if let Some(Value::Object(summary)) = result.get("summary") {
        if printed {
            println!();
        }
        println!("Summary:");
        print_kv_table(summary);
        printed = true;
    }

    if !printed {
        match result {
            Value::Object(map) => print_kv_table(map),
            other => println!("{}", format_value(other)),
        }
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

fn print_kv_table(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.to_string(), format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    let headers: Vec<String> = match arr.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect(),
        Some(_) => {
            for item in arr {
                println!("{}", format_value(item));
            }
            return;
        }
        None => {
            println!("(empty)");
            return;
        }
    };

    // Stored simulations get a compact listing instead of raw columns.
    if headers.iter().any(|h| h == "clientName") && headers.iter().any(|h| h == "summary") {
        print_simulation_list(arr);
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in arr {
        let row: Vec<String> = headers.iter().map(|h| field_str(item, h)).collect();
        builder.push_record(row);
    }
    println!("{}", Table::from(builder));
}

fn print_simulation_list(arr: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record(["Id", "Date", "Client", "Items", "Revenue", "Gross profit"]);

    for sim in arr {
        let item_count = sim
            .get("items")
            .and_then(Value::as_array)
            .map(|items| items.len().to_string())
            .unwrap_or_default();

        builder.push_record([
            field_str(sim, "id"),
            field_str(sim, "date"),
            field_str(sim, "clientName"),
            item_count,
            field_str(&sim["summary"], "totalRevenue"),
            field_str(&sim["summary"], "grossProfit"),
        ]);
    }

    println!("{}", Table::from(builder));
}

fn field_str(value: &Value, key: &str) -> String {
    value.get(key).map(format_value).unwrap_or_default()
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
