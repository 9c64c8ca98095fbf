//! # Schema Construction Errors
//!
//! Validation failures are reported through [`Outcome`](tessera_core::Outcome),
//! never as `Err`. The only fallible operations in this crate are builder
//! calls whose arguments can be malformed, such as a regex pattern.

use thiserror::Error;

/// Error raised while configuring a schema builder.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A string pattern failed to compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as supplied.
        pattern: String,
        /// Why the regex engine rejected it.
        #[source]
        source: regex::Error,
    },
}
