//! Diagnostic sink for a single validation call.
use std::fmt;

use crate::path::Path;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub path: String,
    pub message: String,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Ordered, append-only list of entries.
#[derive(Clone, Debug, Default)]
pub struct Report {
    entries: Vec<Entry>,
}

impl Report {
    pub fn new() -> Self { Self::default() }

    pub fn add(&mut self, path: &Path, message: impl Into<String>) {
        self.entries.push(Entry {
            path: path.render(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool { !self.entries.is_empty() }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn entries(&self) -> &[Entry] { &self.entries }

    pub fn into_entries(self) -> Vec<Entry> { self.entries }

    /// Rendered `"<path>: <message>"` lines, in insertion order.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

/// Append to an optional sink. The message closure only runs when a sink is
/// present, so callers without a report never format text.
#[inline]
pub fn note(report: &mut Option<&mut Report>, path: &Path, message: impl FnOnce() -> String) {
    if let Some(rep) = report.as_deref_mut() {
        rep.add(path, message());
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}
