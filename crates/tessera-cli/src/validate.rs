//! # Validate Subcommand
//!
//! Loads a JSON or YAML document and validates it against a catalog schema.
//!
//! ```bash
//! tessera validate --schema user user.json
//! tessera validate --schema shape shapes/circle.yaml --format json
//! ```
//!
//! Exit code 0 when the document is accepted, 1 when it is rejected or
//! cannot be loaded.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, ValueEnum};
use serde_json::json;

use tessera_core::{Outcome, Value};

use crate::catalog;

/// Arguments for the `tessera validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Catalog schema name (see `tessera schemas`).
    #[arg(long, short)]
    pub schema: String,

    /// Document to validate (`.json`, `.yaml` or `.yml`).
    pub file: PathBuf,

    /// Output rendering.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Normalized JSON on success, one line per error on failure.
    Text,
    /// A single JSON report object.
    Json,
}

/// Execute the validate subcommand.
///
/// # Errors
///
/// Returns an error if the schema name is unknown, the schema fails to
/// build, or the document cannot be read or parsed. A rejected document is
/// not an error; it yields exit code 1.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let entry = catalog::lookup(&args.schema).ok_or_else(|| {
        let known: Vec<&str> = catalog::entries().iter().map(|e| e.name).collect();
        anyhow!("unknown schema '{}' (known: {})", args.schema, known.join(", "))
    })?;
    let schema = entry
        .schema()
        .with_context(|| format!("building schema '{}'", entry.name))?;
    let document = load_document(&args.file)?;

    tracing::info!(schema = entry.name, file = %args.file.display(), "validating document");
    let outcome = schema.validate(&document);
    let code = if outcome.is_valid() { 0 } else { 1 };
    println!("{}", render(&outcome, args.format)?);
    Ok(code)
}

/// Read and parse a document, choosing the parser from the file extension.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unsupported
/// extension, or does not parse.
pub fn load_document(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading document: {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let value = match extension.as_deref() {
        Some("json") => Value::from_json_str(&text),
        Some("yaml" | "yml") => Value::from_yaml_str(&text),
        _ => bail!(
            "unsupported document type: {} (expected .json, .yaml or .yml)",
            path.display()
        ),
    };
    value.with_context(|| format!("parsing document: {}", path.display()))
}

/// Render an outcome for printing.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn render(outcome: &Outcome, format: OutputFormat) -> Result<String> {
    match (format, outcome) {
        (OutputFormat::Text, Outcome::Valid(value)) => {
            Ok(serde_json::to_string_pretty(&value.to_json())?)
        }
        (OutputFormat::Text, Outcome::Invalid(errors)) => {
            let mut lines = vec![format!("INVALID: {} error(s)", errors.len())];
            for err in errors {
                lines.push(format!("  - {err} [{}]", err.code));
                for cause in &err.causes {
                    lines.push(format!("      {cause} [{}]", cause.code));
                }
            }
            Ok(lines.join("\n"))
        }
        (OutputFormat::Json, Outcome::Valid(value)) => Ok(serde_json::to_string_pretty(
            &json!({"valid": true, "value": value}),
        )?),
        (OutputFormat::Json, Outcome::Invalid(errors)) => Ok(serde_json::to_string_pretty(
            &json!({"valid": false, "errors": errors}),
        )?),
    }
}
