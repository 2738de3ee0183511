use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Render a computation envelope as tables: scalar result fields first,
/// then any nested array-of-object field (e.g. an amortization schedule)
/// as its own table, then warnings and methodology.
pub fn print_table(value: &Value) {
    let Some(envelope) = value.as_object() else {
        println!("{}", value);
        return;
    };

    match envelope.get("result") {
        Some(Value::Object(result)) => {
            print_scalar_fields(result);

            for (key, val) in result {
                if let Value::Array(rows) = val {
                    if rows.first().is_some_and(|v| v.is_object()) {
                        println!("\n{}:", key);
                        print_rows(rows);
                    }
                }
            }
        }
        _ => {
            print_scalar_fields(envelope);
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

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

/// Two-column Field/Value table of the non-object, non-tabular fields.
fn print_scalar_fields(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);

    for (key, val) in map {
        match val {
            Value::Array(rows) if rows.first().is_some_and(|v| v.is_object()) => continue,
            Value::Object(_) => continue,
            _ => builder.push_record([key.as_str(), &format_value(val)]),
        }
    }

    println!("{}", Table::from(builder));
}

/// Array of objects rendered as one row per element.
fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(record);
        }
    }

    println!("{}", Table::from(builder));
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
