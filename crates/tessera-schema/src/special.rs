//! # Literal, Enum, Nullable and the Top/Bottom Types
//!
//! Small node kinds with no constraint configuration beyond modality:
//!
//! - [`LiteralSchema`]: exactly one value.
//! - [`EnumSchema`]: one of a fixed set of values.
//! - [`NullableSchema`]: wraps another schema and additionally accepts `Null`.
//! - [`AnySchema`] / [`UnknownSchema`]: pass present values through.
//! - [`VoidSchema`]: accepts anything and yields `Null`.
//! - [`NeverSchema`]: rejects every value.
//!
//! Literal and enum matching use [`Value::same_as`], so a document integer
//! `5` matches a literal `5.0`.

use tessera_core::{ErrorCode, Outcome, ValidationError, Value};

use crate::modality::Modality;
use crate::schema::{NodeKind, Schema, SchemaBuilder};

pub(crate) fn check_literal(expected: &Value, value: &Value) -> Outcome {
    if value.same_as(expected) {
        return Outcome::Valid(value.clone());
    }
    Outcome::fail(
        ValidationError::new(ErrorCode::InvalidLiteral, format!("expected literal value {expected}"))
            .with_value(value.clone()),
    )
}

pub(crate) fn check_enum(allowed: &[Value], value: &Value) -> Outcome {
    if allowed.iter().any(|candidate| value.same_as(candidate)) {
        return Outcome::Valid(value.clone());
    }
    let listed: Vec<String> = allowed.iter().map(ToString::to_string).collect();
    Outcome::fail(
        ValidationError::new(
            ErrorCode::InvalidEnumValue,
            format!("expected one of [{}]", listed.join(", ")),
        )
        .with_value(value.clone()),
    )
}

macro_rules! simple_builder {
    ($(#[$doc:meta])* $name:ident => $kind:ident) => {
        $(#[$doc])*
        #[derive(Debug)]
        pub struct $name {
            modality: Modality,
        }

        impl $name {
            pub fn new() -> Self {
                Self {
                    modality: Modality::default(),
                }
            }
        }

        impl SchemaBuilder for $name {
            fn modality_mut(&mut self) -> &mut Modality {
                &mut self.modality
            }
        }

        impl From<$name> for Schema {
            fn from(builder: $name) -> Self {
                Schema::from_node(builder.modality, NodeKind::$kind)
            }
        }
    };
}

simple_builder!(
    /// Accepts any present value unchanged.
    AnySchema => Any
);
simple_builder!(
    /// Accepts any present value unchanged. Behaves exactly like
    /// [`AnySchema`]; the separate name documents intent.
    UnknownSchema => Unknown
);
simple_builder!(
    /// Accepts any present value and normalizes it to `Null`.
    VoidSchema => Void
);
simple_builder!(
    /// Rejects every value, present or absent, unless a default or
    /// `optional()` excuses absence.
    NeverSchema => Never
);

/// Matches exactly one value.
#[derive(Debug)]
pub struct LiteralSchema {
    modality: Modality,
    value: Value,
}

impl LiteralSchema {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            modality: Modality::default(),
            value: value.into(),
        }
    }
}

impl SchemaBuilder for LiteralSchema {
    fn modality_mut(&mut self) -> &mut Modality {
        &mut self.modality
    }
}

impl From<LiteralSchema> for Schema {
    fn from(builder: LiteralSchema) -> Self {
        Schema::from_node(builder.modality, NodeKind::Literal(builder.value))
    }
}

/// Matches any one of a fixed set of values.
#[derive(Debug)]
pub struct EnumSchema {
    modality: Modality,
    values: Vec<Value>,
}

impl EnumSchema {
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            modality: Modality::default(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl SchemaBuilder for EnumSchema {
    fn modality_mut(&mut self) -> &mut Modality {
        &mut self.modality
    }
}

impl From<EnumSchema> for Schema {
    fn from(builder: EnumSchema) -> Self {
        Schema::from_node(builder.modality, NodeKind::Enum(builder.values))
    }
}

/// Wraps a schema so that `Null` is also accepted.
///
/// An absent value yields the default if one is set, otherwise `Null`; it
/// is never a `required` error. Present values go to the inner schema.
#[derive(Debug)]
pub struct NullableSchema {
    modality: Modality,
    inner: Schema,
}

impl NullableSchema {
    pub fn new(inner: impl Into<Schema>) -> Self {
        Self {
            modality: Modality::default(),
            inner: inner.into(),
        }
    }
}

impl SchemaBuilder for NullableSchema {
    fn modality_mut(&mut self) -> &mut Modality {
        &mut self.modality
    }
}

impl From<NullableSchema> for Schema {
    fn from(builder: NullableSchema) -> Self {
        Schema::from_node(builder.modality, NodeKind::Nullable(builder.inner))
    }
}
