//! Rule-tree interpreter.
//!
//! `evaluate` walks a value against a compiled rule and answers a boolean.
//! When a report is supplied it also records why, innermost cause first:
//!
//! - a failing property records the child's entries, then
//!   `unexpected value for <mandatory|optional> prop <name>` at the object;
//! - an array stops at its first failing element, then records
//!   `not array or unexpected array` at the array;
//! - `All` stops at its first failing child and adds nothing of its own.
//!
//! Without a report no path segment is allocated and no message is formatted.
//!
//! References are resolved by name on each visit. Recursion through a
//! property or an element ends with the value; a cycle of references that
//! stays on one value would not, so consecutive hops at the same value are
//! capped by [`Options::max_reference_depth`]. Descending into a child value
//! resets the count.
use serde_json::Value;

use crate::path::Path;
use crate::primitive::{check_constraint, check_format, kind_matches, quantity};
use crate::registry::Registry;
use crate::report::{note, Report};
use crate::rule::{Check, Rule};

pub const DEFAULT_MAX_REFERENCE_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Consecutive reference hops allowed without descending into the value.
    pub max_reference_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self { max_reference_depth: DEFAULT_MAX_REFERENCE_DEPTH }
    }
}

impl Registry {
    pub fn evaluate(
        &self,
        rule: &Rule,
        value: &Value,
        path: &Path,
        report: Option<&mut Report>,
    ) -> bool {
        self.eval(rule, value, path, report, 0)
    }

    fn eval(
        &self,
        rule: &Rule,
        value: &Value,
        path: &Path,
        mut report: Option<&mut Report>,
        depth: usize,
    ) -> bool {
        let site = rule.site.as_str();
        match &rule.check {
            Check::Type(kind) => {
                if kind_matches(*kind, value) {
                    return true;
                }
                note(&mut report, path, || format!("{} [{site}]", kind.mismatch()));
                false
            }

            Check::Closed(names) => {
                let extra = value
                    .as_object()
                    .and_then(|m| m.keys().find(|k| !names.contains(k.as_str())));
                match extra {
                    None if value.is_object() => true,
                    None => {
                        note(&mut report, path, || format!("not an object [{site}]"));
                        false
                    }
                    Some(key) => {
                        note(&mut report, path, || format!("unexpected prop <{key}> [{site}]"));
                        false
                    }
                }
            }

            Check::PropertyCount(count) => {
                let ok = value.as_object().is_some_and(|m| m.len() == *count);
                if !ok {
                    note(&mut report, path, || format!("bad property count [{site}]"));
                }
                ok
            }

            Check::Property { name, mandatory, rule: child } => {
                // a non-object has no properties
                let Some(prop) = value.as_object().and_then(|m| m.get(name)) else {
                    if *mandatory {
                        note(&mut report, path, || {
                            format!("missing mandatory prop <{name}> [{site}]")
                        });
                        return false;
                    }
                    return true;
                };
                let child_path = trail(&report, path, |p| p.property(name));
                if self.eval(child, prop, &child_path, report.as_deref_mut(), 0) {
                    return true;
                }
                note(&mut report, path, || {
                    let which = if *mandatory { "mandatory" } else { "optional" };
                    format!("unexpected value for {which} prop <{name}> [{site}]")
                });
                false
            }

            Check::Elements(item) => {
                let mut ok = false;
                if let Some(xs) = value.as_array() {
                    ok = true;
                    for (idx, x) in xs.iter().enumerate() {
                        let item_path = trail(&report, path, |p| p.index(idx));
                        if !self.eval(item, x, &item_path, report.as_deref_mut(), 0) {
                            ok = false;
                            break;
                        }
                    }
                }
                if !ok {
                    note(&mut report, path, || format!("not array or unexpected array [{site}]"));
                }
                ok
            }

            Check::Constraint { op, limit } => {
                if check_constraint(value, *op, *limit) {
                    return true;
                }
                note(&mut report, path, || {
                    format!("{} must be {} {limit} [{site}]", quantity(value), op.symbol())
                });
                false
            }

            Check::Pattern(pattern) => {
                if value.as_str().is_some_and(|s| pattern.regex.is_match(s)) {
                    return true;
                }
                note(&mut report, path, || format!("unexpected {} [{site}]", pattern.label));
                false
            }

            Check::Format(format) => {
                if check_format(*format, value) {
                    return true;
                }
                note(&mut report, path, || format!("invalid {} [{site}]", format.label()));
                false
            }

            Check::All(rules) => rules
                .iter()
                .all(|r| self.eval(r, value, path, report.as_deref_mut(), depth)),

            Check::Reference(target) => {
                if depth >= self.options.max_reference_depth {
                    tracing::warn!(schema = %target, depth, "reference depth limit exceeded");
                    note(&mut report, path, || {
                        format!("reference depth limit exceeded [{site}]")
                    });
                    return false;
                }
                match self.rules.get(target) {
                    Some(next) => self.eval(next, value, path, report, depth + 1),
                    None => {
                        // lowering rejects dangling references
                        tracing::error!(schema = %target, "reference to unknown schema");
                        note(&mut report, path, || {
                            format!("unresolved reference <{target}> [{site}]")
                        });
                        false
                    }
                }
            }
        }
    }
}

/// Child path when diagnostics are wanted; otherwise the parent is reused so
/// nothing is allocated.
#[inline]
fn trail(report: &Option<&mut Report>, path: &Path, extend: impl FnOnce(&Path) -> Path) -> Path {
    if report.is_some() {
        extend(path)
    } else {
        path.clone()
    }
}
