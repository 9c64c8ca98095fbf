//! # Array and Tuple Schemas
//!
//! Arrays validate every element against one schema; tuples validate
//! elements positionally, with an optional `rest` schema for the tail.
//! Length checks and element checks all run; errors are aggregated and
//! element errors are tagged `[index]`.

use tessera_core::{ErrorCode, Outcome, PathSegment, ValidationError, Value};

use crate::modality::Modality;
use crate::schema::{Context, NodeKind, Schema, SchemaBuilder};

/// Builder for homogeneous arrays.
#[derive(Debug)]
pub struct ArraySchema {
    modality: Modality,
    rules: ArrayRules,
}

#[derive(Debug)]
pub(crate) struct ArrayRules {
    element: Schema,
    min: Option<usize>,
    max: Option<usize>,
    length: Option<usize>,
    nonempty: bool,
}

impl ArraySchema {
    pub fn new(element: impl Into<Schema>) -> Self {
        Self {
            modality: Modality::default(),
            rules: ArrayRules {
                element: element.into(),
                min: None,
                max: None,
                length: None,
                nonempty: false,
            },
        }
    }

    pub fn min(mut self, count: usize) -> Self {
        self.rules.min = Some(count);
        self
    }

    pub fn max(mut self, count: usize) -> Self {
        self.rules.max = Some(count);
        self
    }

    /// Require exactly `count` elements. Reported as `invalid_type`.
    pub fn length(mut self, count: usize) -> Self {
        self.rules.length = Some(count);
        self
    }

    pub fn nonempty(mut self) -> Self {
        self.rules.nonempty = true;
        self
    }
}

impl SchemaBuilder for ArraySchema {
    fn modality_mut(&mut self) -> &mut Modality {
        &mut self.modality
    }
}

impl From<ArraySchema> for Schema {
    fn from(builder: ArraySchema) -> Self {
        Schema::from_node(builder.modality, NodeKind::Array(builder.rules))
    }
}

/// Validate each item against `schema`; indices in error paths start at `offset`.
fn check_elements(
    schema: &Schema,
    items: &[Value],
    offset: usize,
    ctx: Context,
    output: &mut Vec<Value>,
    errors: &mut Vec<ValidationError>,
) {
    for (i, item) in items.iter().enumerate() {
        let segment = PathSegment::Index(offset + i);
        match schema.validate_in(item, ctx.child()) {
            Outcome::Valid(normalized) => output.push(normalized),
            Outcome::Invalid(item_errors) => {
                errors.extend(item_errors.into_iter().map(|e| e.at(&segment)));
            }
        }
    }
}

fn finish(output: Vec<Value>, errors: Vec<ValidationError>) -> Outcome {
    if errors.is_empty() {
        Outcome::Valid(Value::Array(output))
    } else {
        Outcome::Invalid(errors)
    }
}

impl ArrayRules {
    pub(crate) fn check(&self, value: &Value, ctx: Context) -> Outcome {
        let Some(items) = value.as_array() else {
            return Outcome::fail(
                ValidationError::new(ErrorCode::InvalidType, "expected array").with_value(value.clone()),
            );
        };

        let count = items.len();
        let mut errors = Vec::new();
        let mut fail = |code: ErrorCode, message: String| {
            errors.push(ValidationError::new(code, message).with_value(value.clone()));
        };
        if let Some(exact) = self.length.filter(|&n| count != n) {
            fail(ErrorCode::InvalidType, format!("array must have exactly {exact} elements"));
        }
        if let Some(min) = self.min.filter(|&n| count < n) {
            fail(ErrorCode::TooSmall, format!("array must have at least {min} elements"));
        }
        if let Some(max) = self.max.filter(|&n| count > n) {
            fail(ErrorCode::TooBig, format!("array must have at most {max} elements"));
        }
        if self.nonempty && count == 0 {
            fail(ErrorCode::TooSmall, "array must not be empty".into());
        }

        let mut output = Vec::with_capacity(count);
        check_elements(&self.element, items, 0, ctx, &mut output, &mut errors);
        finish(output, errors)
    }
}

/// Builder for fixed-position tuples.
#[derive(Debug)]
pub struct TupleSchema {
    modality: Modality,
    rules: TupleRules,
}

#[derive(Debug)]
pub(crate) struct TupleRules {
    elements: Vec<Schema>,
    rest: Option<Schema>,
}

impl TupleSchema {
    pub fn new<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Schema>,
    {
        Self {
            modality: Modality::default(),
            rules: TupleRules {
                elements: elements.into_iter().map(Into::into).collect(),
                rest: None,
            },
        }
    }

    /// Allow any number of trailing elements matching `schema`.
    pub fn rest(mut self, schema: impl Into<Schema>) -> Self {
        self.rules.rest = Some(schema.into());
        self
    }
}

impl SchemaBuilder for TupleSchema {
    fn modality_mut(&mut self) -> &mut Modality {
        &mut self.modality
    }
}

impl From<TupleSchema> for Schema {
    fn from(builder: TupleSchema) -> Self {
        Schema::from_node(builder.modality, NodeKind::Tuple(builder.rules))
    }
}

impl TupleRules {
    pub(crate) fn check(&self, value: &Value, ctx: Context) -> Outcome {
        let Some(items) = value.as_array() else {
            return Outcome::fail(
                ValidationError::new(ErrorCode::InvalidType, "expected tuple").with_value(value.clone()),
            );
        };

        let fixed = self.elements.len();
        let mut errors = Vec::new();
        match &self.rest {
            None if items.len() != fixed => errors.push(
                ValidationError::new(ErrorCode::InvalidType, format!("tuple must have exactly {fixed} elements"))
                    .with_value(value.clone()),
            ),
            Some(_) if items.len() < fixed => errors.push(
                ValidationError::new(ErrorCode::TooSmall, format!("tuple must have at least {fixed} elements"))
                    .with_value(value.clone()),
            ),
            _ => {}
        }

        let mut output = Vec::with_capacity(items.len());
        for (i, (schema, item)) in self.elements.iter().zip(items).enumerate() {
            let segment = PathSegment::Index(i);
            match schema.validate_in(item, ctx.child()) {
                Outcome::Valid(normalized) => output.push(normalized),
                Outcome::Invalid(item_errors) => {
                    errors.extend(item_errors.into_iter().map(|e| e.at(&segment)));
                }
            }
        }
        if let Some(rest) = &self.rest {
            let tail = items.get(fixed..).unwrap_or_default();
            check_elements(rest, tail, fixed, ctx, &mut output, &mut errors);
        }
        finish(output, errors)
    }
}
