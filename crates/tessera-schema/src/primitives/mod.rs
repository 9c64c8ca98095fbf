//! # Primitive Leaf Validators
//!
//! String, number, boolean and date validators. Each is a builder that seals
//! into a leaf node; the engine only sees them through
//! [`LeafValidator`](crate::leaf::LeafValidator).

pub mod boolean;
pub mod date;
pub mod number;
pub mod string;

pub use boolean::BooleanSchema;
pub use date::DateSchema;
pub use number::{NumberSchema, MAX_SAFE_INTEGER};
pub use string::StringSchema;
