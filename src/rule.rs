// Compiled rule tree. Built once by `lower`, then only read; sharing one tree
// across threads needs no locking.
use std::collections::HashSet;

use regex::Regex;

use crate::ir::{Format, Kind, Op};

#[derive(Debug)]
pub struct Rule {
    /// Location inside the schema (`.`, `.name`, `.0`, `$Name.x`), appended
    /// to diagnostics as `[site]`.
    pub site: String,
    pub check: Check,
}

#[derive(Debug)]
pub enum Check {
    Type(Kind),
    PropertyCount(usize),
    /// property names an object may carry
    Closed(HashSet<String>),
    Property {
        name: String,
        mandatory: bool,
        rule: Box<Rule>,
    },
    Elements(Box<Rule>),
    Constraint { op: Op, limit: f64 },
    Pattern(Pattern),
    Format(Format),
    All(Vec<Rule>),
    /// resolved by name at evaluation time, so cyclic schemas stay a tree
    Reference(String),
}

#[derive(Debug)]
pub struct Pattern {
    /// `/regex/flags`, as written in the schema
    pub label: String,
    pub regex: Regex,
}
