//! Ordering of loosely typed front-matter values

use serde_json::Value;
use std::cmp::Ordering;

/// Kind rank for values of different kinds:
/// null < bool < text < numeric < array < object
fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::String(s) if numeric_text(s).is_none() => 2,
        Value::Number(_) | Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over JSON values used for sort keys.
///
/// Numbers and numeric strings form one class compared by value, so
/// `year: 2023` and `year: "2023"` sort together. Other strings compare as
/// text and rank below every numeric value, which keeps an empty default last.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (rank(a), rank(b)) {
        (x, y) if x != y => x.cmp(&y),
        (1, _) => a.as_bool().cmp(&b.as_bool()),
        (2, _) => a.as_str().cmp(&b.as_str()),
        (3, _) => compare_f64(numeric(a), numeric(b)),
        (4, _) => match (a, b) {
            (Value::Array(x), Value::Array(y)) => x
                .iter()
                .zip(y.iter())
                .map(|(a, b)| compare_values(a, b))
                .find(|o| o.is_ne())
                .unwrap_or_else(|| x.len().cmp(&y.len())),
            _ => Ordering::Equal,
        },
        _ => Ordering::Equal,
    }
}

/// Finite value of a string that reads as a number
fn numeric_text(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => numeric_text(s),
        _ => None,
    }
}

fn compare_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}
