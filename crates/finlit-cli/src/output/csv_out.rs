use serde_json::Value;
use std::io;

use super::{cell, row_array};

type StdoutCsv<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write CSV to stdout. Row arrays (amortization schedules, scenario
/// batches, replay transitions) win over the scalar field/value layout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let body = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match body {
        Value::Object(map) => {
            if let Some((_, rows)) = row_array(map) {
                write_rows(&mut wtr, rows);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &cell(val, "")]);
                }
            }
        }
        Value::Array(rows) => write_rows(&mut wtr, rows),
        other => {
            let _ = wtr.write_record([cell(other, "")]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut StdoutCsv<'_>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for v in rows {
            let _ = wtr.write_record([cell(v, "")]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let _ = wtr.write_record(&headers);
    for row in rows.iter().filter_map(Value::as_object) {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(|v| cell(v, "")).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&record);
    }
}
