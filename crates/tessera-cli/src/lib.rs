//! # tessera-cli: Command-Line Validation
//!
//! Provides the `tessera` binary: validate JSON and YAML documents against
//! the built-in schema [`catalog`] and print either the normalized value or
//! every field-addressed error.
//!
//! ## Subcommands
//!
//! - `tessera schemas`: list catalog schemas.
//! - `tessera validate --schema <name> <FILE>`: validate one document.
//!
//! ```bash
//! tessera -v validate --schema blog-post post.yaml
//! tessera validate --schema user user.json --format json
//! ```

pub mod catalog;
pub mod validate;

/// Execute the schemas subcommand: one `name  summary` line per entry.
pub fn run_schemas() -> u8 {
    let width = catalog::entries()
        .iter()
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or(0);
    for entry in catalog::entries() {
        println!("{:width$}  {}", entry.name, entry.summary);
    }
    0
}
