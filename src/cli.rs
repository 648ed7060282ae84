//! Minimal CLI: model + documents → (check | test)
use std::io::Read;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use serde_json::Value;

use json_model_check::{Model, Outcome, Registry};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// validate JSON documents against a compiled schema model
#[derive(Parser, Debug)]
#[command(name = "json-model-check", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// check each input document; exit status 1 if any is invalid
    Check(CheckOut),
    /// run test vectors: each input holds `[[expected, value], ...]`
    Test(TestOut),
}

#[derive(Args, Debug, Clone)]
struct ModelSettings {
    /// compiled model (JSON unit with a `schemas` map)
    #[arg(long, short)]
    model: PathBuf,

    /// schema to check against; empty selects the default schema
    #[arg(long, short, default_value = "")]
    schema: String,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct CheckOut {
    #[command(flatten)]
    model_settings: ModelSettings,

    #[command(flatten)]
    input_settings: InputSettings,

    /// only print failures
    #[arg(long, short)]
    quiet: bool,
}

#[derive(clap::Parser, Debug)]
struct TestOut {
    #[command(flatten)]
    model_settings: ModelSettings,

    #[command(flatten)]
    input_settings: InputSettings,
}

struct Document {
    origin: String,
    value: Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl ModelSettings {
    fn load(&self) -> Result<Model> {
        let model = Model::from_file(&self.model);
        // surface model faults before touching any document
        let registry = model.initialize()?;
        registry.lookup(&self.schema)?;
        Ok(model)
    }
}

impl InputSettings {
    fn load(&self) -> Result<Vec<Document>> {
        let mut docs = Vec::new();
        for raw in &self.input {
            if raw == "-" {
                let mut source = String::new();
                std::io::stdin()
                    .read_to_string(&mut source)
                    .context("failed to read stdin")?;
                docs.push(self.parse("<stdin>".to_owned(), &source)?);
                continue;
            }
            for source_path in resolve_file_path_patterns([raw])? {
                let origin = source_path.to_string_lossy().to_string();
                let source = std::fs::read_to_string(&source_path)
                    .with_context(|| format!("failed to read source file ({origin})"))?;
                docs.push(self.parse(origin, &source)?);
            }
        }
        Ok(docs)
    }

    fn parse(&self, origin: String, source: &str) -> Result<Document> {
        let value = serde_json::from_str::<Value>(source)
            .with_context(|| format!("failed to parse JSON source file ({origin})"))?;
        let value = match self.json_pointer.as_deref() {
            None => value,
            Some(pointer) => value
                .pointer(pointer)
                .cloned()
                .ok_or_else(|| anyhow!("JSON pointer {pointer} selects nothing in {origin}"))?,
        };
        Ok(Document { origin, value })
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// `Ok(false)` when a document or test case failed.
    pub fn run(&self) -> Result<bool> {
        match &self.cmd {
            Command::Check(target) => {
                let model = target.model_settings.load()?;
                let registry = model.initialize()?;
                let docs = target.input_settings.load()?;
                let schema = target.model_settings.schema.as_str();

                let outcomes = docs
                    .par_iter()
                    .map(|doc| registry.validate(schema, &doc.value))
                    .collect::<Result<Vec<Outcome>, _>>()?;

                let mut all_valid = true;
                for (doc, outcome) in docs.iter().zip(&outcomes) {
                    all_valid &= outcome.valid;
                    if outcome.valid {
                        if !target.quiet {
                            println!("{} {}", "PASS".green().bold(), doc.origin);
                        }
                    } else {
                        println!("{} {}", "FAIL".red().bold(), doc.origin);
                        print_entries(outcome);
                    }
                }
                tracing::info!(documents = docs.len(), all_valid, "check finished");
                Ok(all_valid)
            }
            Command::Test(target) => {
                let model = target.model_settings.load()?;
                let registry = model.initialize()?;
                let schema = target.model_settings.schema.as_str();

                let mut failed = 0usize;
                let mut total = 0usize;
                for doc in target.input_settings.load()? {
                    let cases = test_cases(&doc)?;
                    let results = run_cases(registry, schema, &cases)?;
                    for (i, ((expected, _), outcome)) in cases.iter().zip(&results).enumerate() {
                        total += 1;
                        if outcome.valid == *expected {
                            println!("Test #{i}: {}", "PASS".green());
                        } else {
                            failed += 1;
                            println!(
                                "Test #{i}: {} (expected {expected}, got {}) in {}",
                                "FAIL".red(),
                                outcome.valid,
                                doc.origin,
                            );
                            print_entries(outcome);
                        }
                    }
                }
                if failed > 0 {
                    println!("\nDone: {failed} of {total} tests failed");
                } else {
                    println!("\nDone: all {total} tests passed");
                }
                Ok(failed == 0)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn print_entries(outcome: &Outcome) {
    for entry in outcome.report.entries() {
        println!("  - {entry}");
    }
}

/// `[[expected, value], ...]`; trailing items in a case are ignored.
fn test_cases(doc: &Document) -> Result<Vec<(bool, &Value)>> {
    let Some(cases) = doc.value.as_array() else {
        bail!("test vector file {} is not an array", doc.origin);
    };
    cases
        .iter()
        .enumerate()
        .map(|(i, case)| match case.as_array().map(Vec::as_slice) {
            Some([Value::Bool(expected), value, ..]) => Ok((*expected, value)),
            _ => Err(anyhow!("malformed test case #{i} in {}", doc.origin)),
        })
        .collect()
}

fn run_cases(registry: &Registry, schema: &str, cases: &[(bool, &Value)]) -> Result<Vec<Outcome>> {
    let outcomes = cases
        .par_iter()
        .map(|(_, value)| registry.validate(schema, value))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(outcomes)
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        Document { origin: "cases.json".to_owned(), value }
    }

    #[test]
    fn parses_test_vectors() {
        let d = doc(json!([[true, { "a": 1 }], [false, null, "note"]]));
        let cases = test_cases(&d).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0], (true, &json!({ "a": 1 })));
        assert_eq!(cases[1], (false, &Value::Null));
    }

    #[test]
    fn rejects_malformed_vectors() {
        assert!(test_cases(&doc(json!({}))).is_err());
        assert!(test_cases(&doc(json!([[true]]))).is_err());
        assert!(test_cases(&doc(json!([["yes", 1]]))).is_err());
    }

    #[test]
    fn json_pointer_selects_subnode() {
        let settings = InputSettings {
            json_pointer: Some("/data/0".to_owned()),
            input: vec![],
        };
        let d = settings.parse("x".to_owned(), r#"{"data": [{"k": 1}]}"#).unwrap();
        assert_eq!(d.value, json!({ "k": 1 }));
        assert!(settings.parse("x".to_owned(), r#"{"data": []}"#).is_err());
    }

    #[test]
    fn cli_parses_check() {
        let cli = CommandLineInterface::try_parse_from([
            "json-model-check", "check", "--model", "unit.json", "--schema", "Person",
            "--input", "a.json", "b.json",
        ])
        .unwrap();
        let Command::Check(target) = cli.cmd else {
            panic!("expected check");
        };
        assert_eq!(target.model_settings.schema, "Person");
        assert_eq!(target.input_settings.input, vec!["a.json", "b.json"]);
        assert!(!target.quiet);
    }
}
