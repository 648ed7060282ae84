//! Leaf checks the interpreter calls into.
//!
//! Everything here is a pure predicate over `serde_json::Value`: wrong input
//! kinds answer `false`, nothing panics, nothing allocates diagnostics.
pub mod constraint;
pub mod format;

use serde_json::Value;

use crate::ir::Kind;

pub use constraint::{check_constraint, measure, quantity};
pub use format::check_format;

/// Whole-valued finite number. JSON has a single number kind, so this is a
/// predicate, not a separate variant.
pub fn is_integer(v: &Value) -> bool {
    v.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}

pub fn kind_matches(kind: Kind, v: &Value) -> bool {
    match kind {
        Kind::Object => v.is_object(),
        Kind::Array => v.is_array(),
        Kind::String => v.is_string(),
        Kind::Number => v.is_number(),
        Kind::Integer => is_integer(v),
        Kind::Bool => v.is_boolean(),
        Kind::Null => v.is_null(),
        Kind::Any => true,
    }
}
