//! # Object Schemas
//!
//! [`ObjectSchema`] is the builder for record validation. Fields are added
//! one at a time with [`field`](ObjectSchema::field); composition
//! directives (`merge`, `extend`, `pick`, `omit`, `partial`,
//! `required_fields`) are recorded and replayed at validation time, see
//! [`fields`](crate::fields).
//!
//! ```
//! use tessera_schema::prelude::*;
//!
//! let user = object()
//!     .field("name", string().min(1))
//!     .field("age", int().min(0.0).optional())
//!     .strict()
//!     .build();
//!
//! let ok = user.validate(&Value::from_json_str(r#"{"name": "Ada"}"#).unwrap());
//! assert!(ok.is_valid());
//! ```

use std::collections::BTreeMap;

use crate::fields::{ObjectShape, Partiality, UnknownKeys};
use crate::modality::Modality;
use crate::schema::{NodeKind, Schema, SchemaBuilder};

/// Builder for object schemas.
#[derive(Debug)]
pub struct ObjectSchema {
    modality: Modality,
    shape: ObjectShape,
}

impl ObjectSchema {
    /// An object with no fields. Unknown keys are stripped.
    pub fn new() -> Self {
        Self {
            modality: Modality::default(),
            shape: ObjectShape::default(),
        }
    }

    /// Add a base field, replacing any base field of the same name.
    pub fn field(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.shape.base.insert(name.into(), schema.into());
        self
    }

    /// Report unknown keys as `unrecognized_keys`. Cancels `passthrough`.
    pub fn strict(mut self) -> Self {
        self.shape.unknown_keys = UnknownKeys::Strict;
        self
    }

    /// Copy unknown keys into the output. Cancels `strict`.
    pub fn passthrough(mut self) -> Self {
        self.shape.unknown_keys = UnknownKeys::Passthrough;
        self
    }

    /// Validate unknown keys against `schema`. Ignored under `strict`.
    pub fn catchall(mut self, schema: impl Into<Schema>) -> Self {
        self.shape.catchall = Some(schema.into());
        self
    }

    /// Make every field optional.
    pub fn partial(mut self) -> Self {
        if self.shape.partial == Partiality::None {
            self.shape.partial = Partiality::Shallow;
        }
        self
    }

    /// Make every field optional, including the fields of nested objects
    /// reached through arrays, tuples, nullables and lazy schemas.
    pub fn deep_partial(mut self) -> Self {
        self.shape.partial = Partiality::Deep;
        self
    }

    /// Force the named fields back to required. Applied after `partial`.
    /// Repeated calls accumulate.
    pub fn required_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shape.required.extend(names.into_iter().map(Into::into));
        self
    }

    /// Keep only the named fields. Replaces any earlier `pick`.
    pub fn pick<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shape.pick = names.into_iter().map(Into::into).collect();
        self
    }

    /// Drop the named fields. Replaces any earlier `omit`.
    pub fn omit<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shape.omit = names.into_iter().map(Into::into).collect();
        self
    }

    /// Add fields that overwrite base and merged fields of the same name.
    /// Repeated calls accumulate.
    pub fn extend<I, K>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        self.shape
            .extend
            .extend(fields.into_iter().map(|(name, schema)| (name.into(), schema)));
        self
    }

    /// Overlay the base fields of `other`. The child schemas are shared,
    /// not copied. Replaces any earlier `merge`.
    pub fn merge(mut self, other: &ObjectSchema) -> Self {
        self.shape.merged = Some(other.shape.base.clone());
        self
    }

    /// Effective field names after every directive, sorted.
    pub fn keyof(&self) -> Vec<String> {
        self.shape.keyof()
    }

    /// The base fields as declared with [`field`](Self::field).
    pub fn shape(&self) -> &BTreeMap<String, Schema> {
        &self.shape.base
    }
}

impl SchemaBuilder for ObjectSchema {
    fn modality_mut(&mut self) -> &mut Modality {
        &mut self.modality
    }
}

impl From<ObjectSchema> for Schema {
    fn from(builder: ObjectSchema) -> Self {
        Schema::from_node(builder.modality, NodeKind::Object(builder.shape))
    }
}
