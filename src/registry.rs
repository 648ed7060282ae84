//! Named schemas and their one-time initialization.
//!
//! A [`Registry`] is the compiled, read-only form of a unit. A [`Model`] owns
//! the recipe for building one and builds it at most once, on first use; a
//! failed build is kept and handed to every later caller.
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use once_cell::sync::OnceCell;
use serde_json::Value;

use crate::error::ModelError;
use crate::interp::Options;
use crate::ir::Unit;
use crate::path::Path;
use crate::report::Report;
use crate::rule::Rule;

/// Result of one top-level validation.
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    pub valid: bool,
    pub report: Report,
}

#[derive(Debug)]
pub struct Registry {
    pub(crate) rules: HashMap<String, Rule>,
    pub(crate) options: Options,
}

impl Registry {
    pub(crate) fn from_rules(rules: HashMap<String, Rule>) -> Self {
        Self { rules, options: Options::default() }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> Options { self.options }

    pub fn len(&self) -> usize { self.rules.len() }

    pub fn is_empty(&self) -> bool { self.rules.is_empty() }

    /// Schema names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn lookup(&self, name: &str) -> Result<&Rule, ModelError> {
        self.rules.get(name).ok_or_else(|| ModelError::NotFound { name: name.to_owned() })
    }

    /// Boolean-only check from the root path. Pass `None` to skip diagnostics
    /// entirely.
    pub fn check(
        &self,
        name: &str,
        value: &Value,
        report: Option<&mut Report>,
    ) -> Result<bool, ModelError> {
        let rule = self.lookup(name)?;
        Ok(self.evaluate(rule, value, &Path::root(), report))
    }

    /// Check and collect diagnostics. `""` is the default schema.
    pub fn validate(&self, name: &str, value: &Value) -> Result<Outcome, ModelError> {
        let mut report = Report::new();
        let valid = self.check(name, value, Some(&mut report))?;
        tracing::debug!(schema = %name, valid, entries = report.len(), "validated");
        Ok(Outcome { valid, report })
    }
}

// ————————————————————————————————————————————————————————————————————————————
// LAZY MODEL
// ————————————————————————————————————————————————————————————————————————————

type Source = Box<dyn Fn() -> Result<Unit, ModelError> + Send + Sync>;

pub struct Model {
    source: Source,
    options: Options,
    registry: OnceCell<Result<Registry, ModelError>>,
}

impl Model {
    /// `source` runs at most once, on the first `initialize`.
    pub fn new(source: impl Fn() -> Result<Unit, ModelError> + Send + Sync + 'static) -> Self {
        Self {
            source: Box::new(source),
            options: Options::default(),
            registry: OnceCell::new(),
        }
    }

    pub fn from_unit(unit: Unit) -> Self {
        Self::new(move || Ok(unit.clone()))
    }

    /// Unit read from a JSON file on first use.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::new(move || crate::path_de::unit_from_file(&path))
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn is_initialized(&self) -> bool { self.registry.get().is_some() }

    /// Build the registry, or wait for the thread already building it.
    /// Every caller sees the same outcome.
    pub fn initialize(&self) -> Result<&Registry, ModelError> {
        self.registry
            .get_or_init(|| {
                let built = (self.source)()
                    .and_then(|unit| crate::lower::lower(&unit))
                    .map(|reg| reg.with_options(self.options));
                match &built {
                    Ok(reg) => tracing::info!(schemas = reg.len(), "model initialized"),
                    Err(error) => tracing::error!(%error, "model initialization failed"),
                }
                built
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn lookup(&self, name: &str) -> Result<&Rule, ModelError> {
        self.initialize()?.lookup(name)
    }

    pub fn validate(&self, name: &str, value: &Value) -> Result<Outcome, ModelError> {
        self.initialize()?.validate(name, value)
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("options", &self.options)
            .field("registry", &self.registry.get())
            .finish_non_exhaustive()
    }
}
