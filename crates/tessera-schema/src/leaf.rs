//! # Leaf Validators
//!
//! A leaf validator checks one scalar value and has no child schemas. The
//! engine treats leaves as opaque collaborators behind [`LeafValidator`]:
//! it hands over a present value (absence has already been resolved) and
//! gets back either a normalized scalar or "no match".
//!
//! The built-in string, number, boolean and date validators live in
//! [`primitives`](crate::primitives). Custom leaves plug in through
//! [`leaf`](crate::leaf()).

use std::fmt;

use tessera_core::{ErrorCode, Outcome, ValidationError, Value};

use crate::modality::Modality;
use crate::schema::{NodeKind, Schema, SchemaBuilder};

/// A stateless scalar validator.
pub trait LeafValidator: fmt::Debug + Send + Sync {
    /// Kind name used in the mismatch message (`"expected <kind>"`).
    fn expected(&self) -> &str;

    /// Code reported when [`coerce`](Self::coerce) does not match.
    fn mismatch_code(&self) -> ErrorCode {
        ErrorCode::InvalidType
    }

    /// Accept and normalize a raw value, or return `None` on a type
    /// mismatch.
    fn coerce(&self, value: &Value) -> Option<Value>;

    /// Constraint checks on the coerced value. Every violation is reported.
    fn constraints(&self, _normalized: &Value) -> Vec<ValidationError> {
        Vec::new()
    }

    /// Final shaping of an accepted value.
    fn finish(&self, normalized: Value) -> Value {
        normalized
    }
}

/// Run a leaf against a present value.
pub(crate) fn run(leaf: &dyn LeafValidator, value: &Value) -> Outcome {
    let Some(normalized) = leaf.coerce(value) else {
        return Outcome::fail(
            ValidationError::new(leaf.mismatch_code(), format!("expected {}", leaf.expected()))
                .with_value(value.clone()),
        );
    };
    let errors = leaf.constraints(&normalized);
    if errors.is_empty() {
        Outcome::Valid(leaf.finish(normalized))
    } else {
        Outcome::Invalid(errors)
    }
}

/// Builder wrapping a caller-supplied [`LeafValidator`].
#[derive(Debug)]
pub struct LeafSchema {
    modality: Modality,
    validator: Box<dyn LeafValidator>,
}

impl LeafSchema {
    pub fn new(validator: impl LeafValidator + 'static) -> Self {
        Self {
            modality: Modality::default(),
            validator: Box::new(validator),
        }
    }
}

impl SchemaBuilder for LeafSchema {
    fn modality_mut(&mut self) -> &mut Modality {
        &mut self.modality
    }
}

impl From<LeafSchema> for Schema {
    fn from(builder: LeafSchema) -> Self {
        Schema::from_node(builder.modality, NodeKind::Leaf(builder.validator))
    }
}
