use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: dig into the result envelope (and a simulation's summary
/// when present), then look for well-known fields in priority order, then
/// fall back to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // A simulation's headline number lives in its summary.
    let focus = result_obj
        .get("summary")
        .filter(|s| s.is_object())
        .unwrap_or(result_obj);

    // Priority list of key output fields
    let priority_keys = [
        "grossProfit",
        "totalRevenue",
        "salesTaxes",
        "unitSalePrice",
        "lineTotal",
        "icms",
        "deleted",
    ];

    if let Value::Object(map) = focus {
        // Try priority keys first (skip null values)
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    // Not an object, just print directly
    println!("{}", format_minimal(focus));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
