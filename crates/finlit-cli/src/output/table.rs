use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{cell, row_array};

/// Render output as tables: scalar fields as a Field/Value table, then any
/// row arrays (schedules, transitions, scenarios) as their own tables.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                print_object(result);
                print_envelope_notes(map);
            }
            _ => print_object(map),
        },
        Value::Array(rows) => print_rows(rows),
        other => println!("{other}"),
    }
}

fn print_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        match val {
            Value::Object(inner) => {
                for (k, v) in inner {
                    builder.push_record([format!("{key}.{k}"), cell(v, "null")]);
                }
            }
            Value::Array(rows) if rows.first().map_or(false, Value::is_object) => {}
            _ => builder.push_record([key.clone(), cell(val, "null")]),
        }
    }
    println!("{}", Table::from(builder));

    if let Some((name, rows)) = row_array(map) {
        println!("\n{name}:");
        print_rows(rows);
    }
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for v in rows {
            println!("{}", cell(v, "null"));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows.iter().filter_map(Value::as_object) {
        builder.push_record(
            headers
                .iter()
                .map(|h| row.get(h).map(|v| cell(v, "null")).unwrap_or_default()),
        );
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }
    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}
