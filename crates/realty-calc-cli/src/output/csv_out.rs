use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
///
/// If the result carries an array-of-object field (amortization schedule),
/// that array becomes the CSV body, since it is the part worth opening in a
/// spreadsheet. Otherwise the scalar result fields are written as
/// field,value rows.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            if let Some(rows) = first_tabular_field(map) {
                write_rows(&mut wtr, rows);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
        }
        Value::Array(arr) => write_rows(&mut wtr, arr),
        other => {
            let _ = wtr.write_record([&format_csv_value(other)]);
        }
    }

    let _ = wtr.flush();
}

/// First field of the result that is an array of objects, if any.
fn first_tabular_field(map: &serde_json::Map<String, Value>) -> Option<&Vec<Value>> {
    map.values().find_map(|v| match v {
        Value::Array(rows) if rows.first().is_some_and(|r| r.is_object()) => Some(rows),
        _ => None,
    })
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            let _ = wtr.write_record([&format_csv_value(row)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
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
