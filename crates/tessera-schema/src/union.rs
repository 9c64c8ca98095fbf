//! # Union Resolution
//!
//! Two strategies:
//!
//! - [`UnionSchema`] tries alternatives in declaration order and returns the
//!   first success verbatim. No alternative is preferred for "matching
//!   better": `union([string(), number()])` returns `42` for `42` because
//!   the string alternative rejects it first. When every alternative fails
//!   the outcome is a single `invalid_union` summary; the per-alternative
//!   errors, tagged `union[i]`, are attached as its `causes`.
//! - [`DiscriminatedUnionSchema`] reads one tag field, looks up the branch
//!   by the tag's string form, and hands the whole value to that branch.
//!   Branch errors are forwarded untouched. Only a missing key counts as a
//!   missing tag; an explicit `null` is looked up as `"null"`.
//!
//! Union alternatives are validated in a fresh context: object partiality
//! applied above a union does not reach into its branches.

use std::collections::BTreeMap;

use tessera_core::{ErrorCode, Outcome, PathSegment, ValidationError, Value};

use crate::modality::Modality;
use crate::schema::{NodeKind, Schema, SchemaBuilder};

/// Builder for first-match unions.
#[derive(Debug)]
pub struct UnionSchema {
    modality: Modality,
    alternatives: Vec<Schema>,
}

impl UnionSchema {
    pub fn new<I, S>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Schema>,
    {
        Self {
            modality: Modality::default(),
            alternatives: alternatives.into_iter().map(Into::into).collect(),
        }
    }

    /// Append one more alternative, tried after the existing ones.
    pub fn or(mut self, alternative: impl Into<Schema>) -> Self {
        self.alternatives.push(alternative.into());
        self
    }
}

impl SchemaBuilder for UnionSchema {
    fn modality_mut(&mut self) -> &mut Modality {
        &mut self.modality
    }
}

impl From<UnionSchema> for Schema {
    fn from(builder: UnionSchema) -> Self {
        Schema::from_node(builder.modality, NodeKind::Union(builder.alternatives))
    }
}

pub(crate) fn check_union(alternatives: &[Schema], value: &Value) -> Outcome {
    let mut causes = Vec::new();
    for (i, alternative) in alternatives.iter().enumerate() {
        match alternative.validate(value) {
            outcome @ Outcome::Valid(_) => return outcome,
            Outcome::Invalid(errors) => {
                tracing::trace!(alternative = i, errors = errors.len(), "union alternative rejected");
                let segment = PathSegment::Branch(i);
                causes.extend(errors.into_iter().map(|e| e.at(&segment)));
            }
        }
    }
    Outcome::fail(
        ValidationError::new(
            ErrorCode::InvalidUnion,
            format!(
                "value does not match any of the union types ({} alternatives tried)",
                alternatives.len()
            ),
        )
        .with_value(value.clone())
        .with_causes(causes),
    )
}

/// Builder for tag-dispatched unions.
///
/// ```
/// use tessera_schema::prelude::*;
///
/// let shape = discriminated_union("type")
///     .option("circle", object().field("type", literal("circle")).field("radius", number().positive()))
///     .option("square", object().field("type", literal("square")).field("side", number().positive()))
///     .build();
///
/// let circle = Value::from_json_str(r#"{"type": "circle", "radius": 5.5}"#).unwrap();
/// assert!(shape.validate(&circle).is_valid());
/// ```
#[derive(Debug)]
pub struct DiscriminatedUnionSchema {
    modality: Modality,
    rules: DiscriminatedRules,
}

#[derive(Debug)]
pub(crate) struct DiscriminatedRules {
    discriminant: String,
    options: BTreeMap<String, Schema>,
}

impl DiscriminatedUnionSchema {
    pub fn new(discriminant: impl Into<String>) -> Self {
        Self {
            modality: Modality::default(),
            rules: DiscriminatedRules {
                discriminant: discriminant.into(),
                options: BTreeMap::new(),
            },
        }
    }

    /// Register the branch selected when the tag's string form is `tag`.
    /// Each branch should itself check the tag field, typically with a
    /// literal.
    pub fn option(mut self, tag: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.rules.options.insert(tag.into(), schema.into());
        self
    }

    pub fn discriminant(&self) -> &str {
        &self.rules.discriminant
    }
}

impl SchemaBuilder for DiscriminatedUnionSchema {
    fn modality_mut(&mut self) -> &mut Modality {
        &mut self.modality
    }
}

impl From<DiscriminatedUnionSchema> for Schema {
    fn from(builder: DiscriminatedUnionSchema) -> Self {
        Schema::from_node(builder.modality, NodeKind::DiscriminatedUnion(builder.rules))
    }
}

impl DiscriminatedRules {
    pub(crate) fn check(&self, value: &Value) -> Outcome {
        if value.as_object().is_none() {
            return Outcome::fail(
                ValidationError::new(ErrorCode::InvalidType, "expected object for discriminated union")
                    .with_value(value.clone()),
            );
        }
        // An explicit `null` tag is present and looked up as "null".
        let Some(tag) = value.get(&self.discriminant) else {
            return Outcome::fail(
                ValidationError::new(
                    ErrorCode::InvalidUnion,
                    format!("missing discriminant field '{}'", self.discriminant),
                )
                .with_value(value.clone()),
            );
        };
        let key = tag.to_string();
        let Some(branch) = self.options.get(&key) else {
            return Outcome::fail(
                ValidationError::new(ErrorCode::InvalidUnion, format!("unknown discriminant value '{key}'"))
                    .with_value(tag.clone()),
            );
        };
        tracing::trace!(discriminant = %self.discriminant, tag = %key, "dispatching discriminated union");
        branch.validate(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use serde_json::json;

    fn doc(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn first_match_wins() {
        let id = union([string().build(), number().build()]).build();
        assert_eq!(id.validate(&Value::Int(42)), Outcome::valid(42.0));
        assert_eq!(id.validate(&Value::from("42")), Outcome::valid("42"));
    }

    #[test]
    fn earlier_alternative_shadows_later() {
        let loose = union([number().build(), string().build()]).build();
        assert_eq!(loose.validate(&Value::from("42")), Outcome::valid(42.0));
    }

    #[test]
    fn summary_error_with_tagged_causes() {
        let schema = union([string().build(), int().build()]).or(boolean()).build();
        let outcome = schema.validate(&doc(json!([1])));
        assert_eq!(outcome.errors().len(), 1);
        let summary = &outcome.errors()[0];
        assert_eq!(summary.code, ErrorCode::InvalidUnion);
        assert_eq!(
            summary.message,
            "value does not match any of the union types (3 alternatives tried)"
        );
        let cause_fields: Vec<&str> = summary.causes.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(cause_fields, ["union[0]", "union[1]", "union[2]"]);
    }

    #[test]
    fn union_modality() {
        let schema = union([string().build()]).optional().build();
        assert_eq!(schema.validate(&Value::Null), Outcome::Valid(Value::Null));
        let schema = union([string().build()]).build();
        assert_eq!(schema.validate(&Value::Null).errors()[0].code, ErrorCode::Required);
    }

    fn shapes() -> Schema {
        discriminated_union("type")
            .option(
                "circle",
                object().field("type", literal("circle")).field("radius", number().positive()),
            )
            .option(
                "rectangle",
                object()
                    .field("type", literal("rectangle"))
                    .field("width", number().positive())
                    .field("height", number().positive()),
            )
            .build()
    }

    #[test]
    fn dispatches_on_tag() {
        assert!(shapes().validate(&doc(json!({"type": "circle", "radius": 5.5}))).is_valid());
        assert!(shapes()
            .validate(&doc(json!({"type": "rectangle", "width": 1, "height": 2})))
            .is_valid());
    }

    #[test]
    fn branch_errors_are_forwarded() {
        let outcome = shapes().validate(&doc(json!({"type": "circle"})));
        assert_eq!(outcome.errors().len(), 1);
        assert_eq!(outcome.errors()[0].field, "radius");
        assert_eq!(outcome.errors()[0].code, ErrorCode::Required);
    }

    #[test]
    fn missing_and_unknown_tags() {
        let missing = shapes().validate(&doc(json!({"radius": 1})));
        assert_eq!(missing.errors()[0].code, ErrorCode::InvalidUnion);
        assert_eq!(missing.errors()[0].message, "missing discriminant field 'type'");

        let unknown = shapes().validate(&doc(json!({"type": "triangle"})));
        assert_eq!(unknown.errors()[0].message, "unknown discriminant value 'triangle'");
        assert_eq!(unknown.errors()[0].value, Value::from("triangle"));

        let null_tag = shapes().validate(&doc(json!({"type": null, "radius": 1})));
        assert_eq!(null_tag.errors().len(), 1);
        assert_eq!(null_tag.errors()[0].code, ErrorCode::InvalidUnion);
        assert_eq!(null_tag.errors()[0].message, "unknown discriminant value 'null'");
        assert_eq!(null_tag.errors()[0].value, Value::Null);

        let not_object = shapes().validate(&Value::from("circle"));
        assert_eq!(not_object.errors()[0].code, ErrorCode::InvalidType);
        assert_eq!(not_object.errors()[0].message, "expected object for discriminated union");
    }

    #[test]
    fn non_string_tags_use_their_display_form() {
        let versioned = discriminated_union("v")
            .option("1", object().field("v", literal(1)))
            .option("true", object().field("v", literal(true)))
            .build();
        assert!(versioned.validate(&doc(json!({"v": 1}))).is_valid());
        assert!(versioned.validate(&doc(json!({"v": true}))).is_valid());
        assert!(!versioned.validate(&doc(json!({"v": 2}))).is_valid());
    }
}
