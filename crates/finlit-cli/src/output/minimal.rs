use serde_json::Value;

/// Headline figure for each command, in lookup order.
const HEADLINE_KEYS: [&str; 8] = [
    "future_value",
    "monthly_payment",
    "savings_rate_percent",
    "achievement_percent",
    "months_to_goal",
    "total_score",
    "score",
    "correct_answer",
];

/// Print only the headline figure, for shell pipelines.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // amortization nests the EMI figures under "summary"; replays under "summary" too
    let candidates = [result, result.get("summary").unwrap_or(&Value::Null)];

    for obj in candidates.iter().filter_map(|v| v.as_object()) {
        for key in HEADLINE_KEYS {
            match obj.get(key) {
                Some(Value::Null) | None => continue,
                Some(val) => {
                    println!("{}", scalar(val));
                    return;
                }
            }
        }
    }

    match result {
        Value::Object(map) => {
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, scalar(val));
            }
        }
        other => println!("{}", scalar(other)),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
