//! # tessera-core: Foundational Types for Tessera
//!
//! This crate is the leaf of the Tessera crate DAG. It defines the vocabulary
//! every schema node speaks: the dynamic [`Value`] that flows through a
//! schema tree, the [`Outcome`] each node returns, and the structured
//! [`ValidationError`] list a rejected value carries.
//!
//! ## Key Design Principles
//!
//! 1. **One closed value type.** Inputs are modelled as a [`Value`] sum type
//!    (null, bool, int, float, string, date, array, object). Validators
//!    pattern-match on it; there is no runtime reflection.
//!
//! 2. **`Null` is the absent sentinel.** A missing object key and an explicit
//!    `null` are the same thing to the engine. Empty strings and zero are
//!    present values.
//!
//! 3. **Outcomes cannot be half-populated.** [`Outcome`] is either
//!    `Valid(value)` or `Invalid(errors)`, never both.
//!
//! 4. **Paths compose once per level.** Composite nodes re-tag child errors
//!    with a [`PathSegment`]; segments are prefixed outermost-first so a
//!    failure deep in a tree reads `author.profile.social.twitter`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tessera-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod outcome;
pub mod path;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::{ErrorCode, ValidationError, ValidationFailure, ValueError};
pub use outcome::Outcome;
pub use path::PathSegment;
pub use value::Value;
