//! # Lazy Schemas
//!
//! A lazy node holds a constructor instead of a schema. The constructor runs
//! on first validation and its result is cached in a [`OnceLock`]; every
//! later validation, on any thread, reuses that one schema. This is the only
//! way to express a schema that contains itself.
//!
//! ```
//! use std::sync::OnceLock;
//! use tessera_schema::prelude::*;
//!
//! fn category() -> Schema {
//!     static CATEGORY: OnceLock<Schema> = OnceLock::new();
//!     CATEGORY
//!         .get_or_init(|| {
//!             object()
//!                 .field("name", string())
//!                 .field("children", array(lazy(category)).optional())
//!                 .build()
//!         })
//!         .clone()
//! }
//!
//! let tree = Value::from_json_str(
//!     r#"{"name": "root", "children": [{"name": "leaf", "children": []}]}"#,
//! )
//! .unwrap();
//! assert!(category().validate(&tree).is_valid());
//! ```
//!
//! ## Re-entrancy
//!
//! The constructor must not validate against the lazy node it belongs to;
//! `OnceLock` blocks re-entrant initialization.

use std::fmt;
use std::sync::OnceLock;

use crate::modality::Modality;
use crate::schema::{NodeKind, Schema, SchemaBuilder};

type Constructor = Box<dyn Fn() -> Schema + Send + Sync>;

/// Builder for deferred schemas.
#[derive(Debug)]
pub struct LazySchema {
    modality: Modality,
    cell: LazyCell,
}

/// One-time construction cell.
pub(crate) struct LazyCell {
    constructor: Constructor,
    resolved: OnceLock<Schema>,
}

impl LazySchema {
    pub fn new<F>(constructor: F) -> Self
    where
        F: Fn() -> Schema + Send + Sync + 'static,
    {
        Self {
            modality: Modality::default(),
            cell: LazyCell {
                constructor: Box::new(constructor),
                resolved: OnceLock::new(),
            },
        }
    }
}

impl LazyCell {
    /// The constructed schema, building it on first call.
    pub(crate) fn resolve(&self) -> &Schema {
        self.resolved.get_or_init(|| {
            let schema = (self.constructor)();
            tracing::debug!(kind = schema.kind_name(), "constructed lazy schema");
            schema
        })
    }
}

impl fmt::Debug for LazyCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolved.get() {
            Some(schema) => write!(f, "LazyCell(<{}>)", schema.kind_name()),
            None => f.write_str("LazyCell(<unresolved>)"),
        }
    }
}

impl SchemaBuilder for LazySchema {
    fn modality_mut(&mut self) -> &mut Modality {
        &mut self.modality
    }
}

impl From<LazySchema> for Schema {
    fn from(builder: LazySchema) -> Self {
        Schema::from_node(builder.modality, NodeKind::Lazy(builder.cell))
    }
}
