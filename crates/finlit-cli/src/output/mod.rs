pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Render a JSON leaf for a table cell or CSV field. `Null` renders as `null`
/// in tables and as an empty field in CSV.
pub(crate) fn cell(value: &Value, null: &str) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => null.to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// The first array of row objects in a result, e.g. an amortization
/// schedule, replay transitions or a scenario batch.
pub(crate) fn row_array<'a>(map: &'a serde_json::Map<String, Value>) -> Option<(&'a str, &'a [Value])> {
    map.iter().find_map(|(k, v)| match v {
        Value::Array(rows) if rows.first().map_or(false, Value::is_object) => {
            Some((k.as_str(), rows.as_slice()))
        }
        _ => None,
    })
}
