use serde_json::Value;

/// Print just the headline figure from the output.
///
/// Looks for the primary result field of each calculator in priority
/// order, then falls back to the first non-null field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = ["monthly_payment", "future_value", "duty_amount", "amount"];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        // Fallback: first non-null scalar field
        for val in map.values() {
            if !val.is_null() && !val.is_array() && !val.is_object() {
                println!("{}", format_minimal(val));
                return;
            }
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
