//! # Schema Nodes
//!
//! A [`Schema`] is a sealed, immutable, reference-counted validator for one
//! shape of data. Schemas are produced by builders (`ObjectSchema`,
//! `StringSchema`, ...) through [`SchemaBuilder::build`] or `Into<Schema>`.
//!
//! ## Seal Discipline
//!
//! Builders are owned values configured by chaining; converting one into a
//! `Schema` seals it. A `Schema` has no mutating methods at all, so a tree
//! that has been validated against can never be observed half-configured.
//! Cloning a `Schema` shares the node: `extend`/`merge` reuse child nodes
//! by reference.
//!
//! ## Dispatch
//!
//! Node kinds form a closed enum matched exhaustively. Leaf validators are
//! the one open seam: anything implementing
//! [`LeafValidator`](crate::leaf::LeafValidator) plugs in as a leaf.
//!
//! ## Thread Safety
//!
//! `Schema` is `Send + Sync`. The only interior state is the lazy node's
//! one-time cell.

use std::fmt;
use std::sync::Arc;

use tessera_core::{Outcome, Value};

use crate::array::{ArrayRules, TupleRules};
use crate::fields::ObjectShape;
use crate::lazy::LazyCell;
use crate::leaf::{self, LeafValidator};
use crate::modality::{never_error, AbsentPolicy, Modality, Presence};
use crate::special;
use crate::union::DiscriminatedRules;

/// A sealed, shareable schema node.
#[derive(Clone)]
pub struct Schema(Arc<Node>);

pub(crate) struct Node {
    pub(crate) modality: Modality,
    pub(crate) kind: NodeKind,
}

#[derive(Debug)]
pub(crate) enum NodeKind {
    Leaf(Box<dyn LeafValidator>),
    Object(ObjectShape),
    Array(ArrayRules),
    Tuple(TupleRules),
    Union(Vec<Schema>),
    DiscriminatedUnion(DiscriminatedRules),
    Lazy(LazyCell),
    Literal(Value),
    Enum(Vec<Value>),
    Nullable(Schema),
    Any,
    Unknown,
    Void,
    Never,
}

/// Per-call state handed from a parent node to a child.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Context {
    /// Presence imposed by the enclosing object (partial / required fields).
    pub(crate) presence: Option<Presence>,
    /// Set while validating beneath a deep-partial object.
    pub(crate) deep_partial: bool,
}

impl Context {
    /// Context for a child node: overrides do not leak further down, deep
    /// partiality does.
    pub(crate) fn child(self) -> Self {
        Self {
            presence: None,
            deep_partial: self.deep_partial,
        }
    }
}

impl Schema {
    pub(crate) fn from_node(modality: Modality, kind: NodeKind) -> Self {
        Self(Arc::new(Node { modality, kind }))
    }

    /// Validate a value, returning the normalized value or every violation.
    ///
    /// Pass [`Value::Null`] to validate an absent value.
    pub fn validate(&self, value: &Value) -> Outcome {
        self.validate_in(value, Context::default())
    }

    pub(crate) fn validate_in(&self, value: &Value, ctx: Context) -> Outcome {
        let node = &*self.0;
        if value.is_null() {
            let presence = ctx.presence.unwrap_or(node.modality.presence());
            return node.modality.resolve_absent(presence, node.kind.absent_policy());
        }
        node.kind.check(value, ctx)
    }

    pub fn modality(&self) -> &Modality {
        &self.0.modality
    }

    pub fn is_optional(&self) -> bool {
        self.0.modality.is_optional()
    }

    /// Lowercase name of this node's kind.
    pub fn kind_name(&self) -> &'static str {
        match &self.0.kind {
            NodeKind::Leaf(_) => "leaf",
            NodeKind::Object(_) => "object",
            NodeKind::Array(_) => "array",
            NodeKind::Tuple(_) => "tuple",
            NodeKind::Union(_) => "union",
            NodeKind::DiscriminatedUnion(_) => "discriminated_union",
            NodeKind::Lazy(_) => "lazy",
            NodeKind::Literal(_) => "literal",
            NodeKind::Enum(_) => "enum",
            NodeKind::Nullable(_) => "nullable",
            NodeKind::Any => "any",
            NodeKind::Unknown => "unknown",
            NodeKind::Void => "void",
            NodeKind::Never => "never",
        }
    }

    /// Effective field names of an object node, sorted. `None` for every
    /// other kind.
    pub fn keyof(&self) -> Option<Vec<String>> {
        match &self.0.kind {
            NodeKind::Object(shape) => Some(shape.keyof()),
            _ => None,
        }
    }

    /// Returns true if both handles point at the same node.
    pub fn ptr_eq(&self, other: &Schema) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl NodeKind {
    fn absent_policy(&self) -> AbsentPolicy {
        match self {
            Self::Nullable(_) => AbsentPolicy::AcceptNull,
            Self::Never => AbsentPolicy::Never,
            _ => AbsentPolicy::Standard,
        }
    }

    /// Type-specific validation of a present value.
    fn check(&self, value: &Value, ctx: Context) -> Outcome {
        match self {
            Self::Leaf(validator) => leaf::run(validator.as_ref(), value),
            Self::Object(shape) => shape.check(value, ctx),
            Self::Array(rules) => rules.check(value, ctx),
            Self::Tuple(rules) => rules.check(value, ctx),
            Self::Union(alternatives) => crate::union::check_union(alternatives, value),
            Self::DiscriminatedUnion(rules) => rules.check(value),
            Self::Lazy(cell) => cell.resolve().validate_in(value, ctx.child()),
            Self::Literal(expected) => special::check_literal(expected, value),
            Self::Enum(allowed) => special::check_enum(allowed, value),
            Self::Nullable(inner) => inner.validate_in(value, ctx.child()),
            Self::Any | Self::Unknown => Outcome::Valid(value.clone()),
            Self::Void => Outcome::Valid(Value::Null),
            Self::Never => Outcome::fail(never_error(value)),
        }
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("modality", &self.0.modality)
            .field("kind", &self.0.kind)
            .finish()
    }
}

/// Chainable configuration shared by every builder.
///
/// Calling [`build`](SchemaBuilder::build) (or converting with `into()`)
/// seals the builder into an immutable [`Schema`].
pub trait SchemaBuilder: Into<Schema> {
    #[doc(hidden)]
    fn modality_mut(&mut self) -> &mut Modality;

    /// Accept an absent value, yielding `Null`.
    fn optional(mut self) -> Self {
        self.modality_mut().set_presence(Presence::Optional);
        self
    }

    /// Reject an absent value with a `required` error.
    fn required(mut self) -> Self {
        self.modality_mut().set_presence(Presence::Required);
        self
    }

    /// Substitute `value` for an absent value. The default is not
    /// re-validated.
    fn default(mut self, value: impl Into<Value>) -> Self {
        self.modality_mut().set_default(value.into());
        self
    }

    /// Seal the builder.
    fn build(self) -> Schema {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn schema_is_send_and_sync() {
        assert_send_sync::<Schema>();
    }

    #[test]
    fn clones_share_the_node() {
        let a = Schema::from_node(Modality::default(), NodeKind::Any);
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        let c = Schema::from_node(Modality::default(), NodeKind::Any);
        assert!(!a.ptr_eq(&c));
    }

    #[test]
    fn child_context_drops_presence_keeps_deep_partial() {
        let ctx = Context {
            presence: Some(Presence::Optional),
            deep_partial: true,
        };
        let child = ctx.child();
        assert_eq!(child.presence, None);
        assert!(child.deep_partial);
    }

    #[test]
    fn any_passes_present_values_through() {
        let any = Schema::from_node(Modality::default(), NodeKind::Any);
        assert_eq!(any.validate(&Value::Int(3)), Outcome::Valid(Value::Int(3)));
        assert!(!any.validate(&Value::Null).is_valid());
        assert_eq!(any.kind_name(), "any");
        assert!(any.keyof().is_none());
    }

    #[test]
    fn void_discards_present_values() {
        let void = Schema::from_node(Modality::default(), NodeKind::Void);
        assert_eq!(void.validate(&Value::from("x")), Outcome::Valid(Value::Null));
    }

    #[test]
    fn never_rejects_everything() {
        let never = Schema::from_node(Modality::default(), NodeKind::Never);
        for v in [Value::Null, Value::Int(1), Value::from("x")] {
            let outcome = never.validate(&v);
            assert!(!outcome.is_valid());
            assert_eq!(outcome.errors()[0].code, tessera_core::ErrorCode::InvalidType);
        }
    }
}
