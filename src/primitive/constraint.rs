use serde_json::Value;

use crate::ir::Op;

/// Quantity a constraint compares: the number itself, a string's codepoint
/// count, or an array/object's size. Bool and null carry none.
pub fn measure(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Array(xs) => Some(xs.len() as f64),
        Value::Object(m) => Some(m.len() as f64),
        Value::Null | Value::Bool(_) => None,
    }
}

/// Word used in diagnostics for what `measure` picked.
pub fn quantity(v: &Value) -> &'static str {
    match v {
        Value::String(_) => "length",
        Value::Array(_) | Value::Object(_) => "size",
        _ => "value",
    }
}

pub fn check_constraint(v: &Value, op: Op, limit: f64) -> bool {
    let Some(val) = measure(v) else {
        return false;
    };
    match op {
        Op::Eq => val == limit,
        Op::Ne => val != limit,
        Op::Le => val <= limit,
        Op::Lt => val < limit,
        Op::Ge => val >= limit,
        Op::Gt => val > limit,
    }
}
