//! # tessera-schema: Declarative Schema Composition
//!
//! Build a tree of schema nodes once, then validate any number of
//! [`Value`]s against it. Each validation returns an [`Outcome`]: the
//! normalized value, or every violation with a composed field path.
//!
//! ```
//! use tessera_schema::prelude::*;
//!
//! let todo = object()
//!     .field("id", string().uuid())
//!     .field("title", string().trim().min(1).max(200))
//!     .field("priority", enumeration(["low", "medium", "high"]).default("medium"))
//!     .field("tags", array(string().max(20)).max(5).optional())
//!     .build();
//!
//! let input = Value::from_json_str(
//!     r#"{"id": "123e4567-e89b-12d3-a456-426614174000", "title": "  Ship it "}"#,
//! )
//! .unwrap();
//! let normalized = todo.validate(&input).into_result().unwrap();
//! assert_eq!(normalized.get("title"), Some(&Value::from("Ship it")));
//! assert_eq!(normalized.get("priority"), Some(&Value::from("medium")));
//! ```
//!
//! ## Key Design Principles
//!
//! 1. **Builders seal into schemas.** Every constructor returns an owned
//!    builder; `build()` or `into()` turns it into an immutable, `Send +
//!    Sync` [`Schema`]. There is no way to reconfigure a schema once it
//!    exists.
//!
//! 2. **Absence is resolved first.** Each node settles a `Null` input from
//!    its modality (default, then optional, then required) before any
//!    type-specific logic runs. See [`modality`].
//!
//! 3. **Composites never short-circuit.** Objects, arrays and tuples visit
//!    every child and report every error. Plain unions are the one
//!    exception: they report a single summary error.
//!
//! 4. **Field sets are derived per call.** Object composition directives
//!    are replayed on each validation; shared child schemas are never
//!    modified. See [`fields`].
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Validation never returns `Err`; only builder misconfiguration does
//!   ([`SchemaError`]).

pub mod array;
pub mod error;
pub mod fields;
pub mod lazy;
pub mod leaf;
pub mod modality;
pub mod object;
pub mod primitives;
pub mod schema;
pub mod special;
pub mod union;

pub use array::{ArraySchema, TupleSchema};
pub use error::SchemaError;
pub use fields::UnknownKeys;
pub use lazy::LazySchema;
pub use leaf::{LeafSchema, LeafValidator};
pub use modality::{Modality, Presence};
pub use object::ObjectSchema;
pub use primitives::{BooleanSchema, DateSchema, NumberSchema, StringSchema, MAX_SAFE_INTEGER};
pub use schema::{Schema, SchemaBuilder};
pub use special::{
    AnySchema, EnumSchema, LiteralSchema, NeverSchema, NullableSchema, UnknownSchema, VoidSchema,
};
pub use union::{DiscriminatedUnionSchema, UnionSchema};

pub use tessera_core::{ErrorCode, Outcome, PathSegment, ValidationError, ValidationFailure, Value};

pub fn string() -> StringSchema {
    StringSchema::new()
}

/// A number schema that normalizes to `Value::Float`.
pub fn number() -> NumberSchema {
    NumberSchema::new()
}

/// A number schema that requires an integral value and normalizes to
/// `Value::Int`.
pub fn int() -> NumberSchema {
    NumberSchema::integer()
}

/// Alias of [`number`].
pub fn float() -> NumberSchema {
    NumberSchema::new()
}

pub fn boolean() -> BooleanSchema {
    BooleanSchema::new()
}

/// Alias of [`boolean`].
pub fn bool() -> BooleanSchema {
    BooleanSchema::new()
}

pub fn date() -> DateSchema {
    DateSchema::new()
}

pub fn object() -> ObjectSchema {
    ObjectSchema::new()
}

pub fn array(element: impl Into<Schema>) -> ArraySchema {
    ArraySchema::new(element)
}

pub fn tuple<I, S>(elements: I) -> TupleSchema
where
    I: IntoIterator<Item = S>,
    S: Into<Schema>,
{
    TupleSchema::new(elements)
}

pub fn union<I, S>(alternatives: I) -> UnionSchema
where
    I: IntoIterator<Item = S>,
    S: Into<Schema>,
{
    UnionSchema::new(alternatives)
}

/// A union dispatched on the object field `discriminant`. Add branches
/// with [`DiscriminatedUnionSchema::option`].
pub fn discriminated_union(discriminant: impl Into<String>) -> DiscriminatedUnionSchema {
    DiscriminatedUnionSchema::new(discriminant)
}

/// A schema built by `constructor` on first use. See [`lazy`](mod@lazy).
pub fn lazy<F>(constructor: F) -> LazySchema
where
    F: Fn() -> Schema + Send + Sync + 'static,
{
    LazySchema::new(constructor)
}

pub fn literal(value: impl Into<Value>) -> LiteralSchema {
    LiteralSchema::new(value)
}

/// One of a fixed set of values. Named to avoid the `enum` keyword.
pub fn enumeration<I, V>(values: I) -> EnumSchema
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    EnumSchema::new(values)
}

pub fn nullable(inner: impl Into<Schema>) -> NullableSchema {
    NullableSchema::new(inner)
}

pub fn any() -> AnySchema {
    AnySchema::new()
}

pub fn unknown() -> UnknownSchema {
    UnknownSchema::new()
}

pub fn void() -> VoidSchema {
    VoidSchema::new()
}

pub fn never() -> NeverSchema {
    NeverSchema::new()
}

/// Wrap a custom [`LeafValidator`] as a schema builder.
pub fn leaf(validator: impl LeafValidator + 'static) -> LeafSchema {
    LeafSchema::new(validator)
}

/// Everything needed to declare and run schemas.
pub mod prelude {
    pub use crate::{
        any, array, boolean, date, discriminated_union, enumeration, float, int, lazy, leaf,
        literal, never, nullable, number, object, string, tuple, union, unknown, void,
    };
    pub use crate::{LeafValidator, Schema, SchemaBuilder};
    pub use tessera_core::{ErrorCode, Outcome, ValidationError, Value};
}
