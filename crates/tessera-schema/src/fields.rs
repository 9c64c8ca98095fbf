//! # Field-Set Derivation and Object Validation
//!
//! An object node stores the directives it was configured with, never a
//! pre-computed field map. [`ObjectShape::effective_fields`] replays them in
//! a fixed order on every call:
//!
//! 1. base fields
//! 2. `merge` (the merged object's base fields, overwriting)
//! 3. `extend` (overwriting)
//! 4. `pick` (keep only listed names that exist; unknown names are ignored)
//! 5. `omit`
//! 6. `partial` / `deep_partial` (every remaining field optional)
//! 7. `required_fields` (listed fields forced required, always last)
//!
//! Steps 6 and 7 do not touch the child schemas. They produce a per-call
//! presence override that travels down in the validation [`Context`], so a
//! child shared with other objects is never altered.
//!
//! ## Error Aggregation
//!
//! Every field and every unknown key is visited; errors are collected, never
//! short-circuited. Child errors are re-tagged with the field name exactly
//! once at this level.

use std::collections::BTreeMap;

use tessera_core::{ErrorCode, Outcome, PathSegment, ValidationError, Value};

use crate::modality::Presence;
use crate::schema::{Context, Schema};

/// What to do with input keys that are not in the effective field map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeys {
    /// Drop them from the output.
    #[default]
    Strip,
    /// Report each one as `unrecognized_keys`.
    Strict,
    /// Copy them into the output unchanged.
    Passthrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Partiality {
    #[default]
    None,
    Shallow,
    Deep,
}

/// One entry of the effective field map.
#[derive(Debug, Clone)]
pub(crate) struct FieldSlot {
    pub(crate) schema: Schema,
    pub(crate) presence: Option<Presence>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ObjectShape {
    pub(crate) base: BTreeMap<String, Schema>,
    pub(crate) merged: Option<BTreeMap<String, Schema>>,
    pub(crate) extend: BTreeMap<String, Schema>,
    pub(crate) pick: Vec<String>,
    pub(crate) omit: Vec<String>,
    pub(crate) partial: Partiality,
    pub(crate) required: Vec<String>,
    pub(crate) unknown_keys: UnknownKeys,
    pub(crate) catchall: Option<Schema>,
}

impl ObjectShape {
    /// Replay the directives into the field map used for one validation.
    ///
    /// `inherited_deep` is set when an enclosing object is deep-partial.
    pub(crate) fn effective_fields(&self, inherited_deep: bool) -> BTreeMap<String, FieldSlot> {
        let mut fields: BTreeMap<String, Schema> = self.base.clone();
        if let Some(merged) = &self.merged {
            fields.extend(merged.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        fields.extend(self.extend.iter().map(|(k, v)| (k.clone(), v.clone())));

        if !self.pick.is_empty() {
            fields.retain(|name, _| self.pick.contains(name));
        }
        for name in &self.omit {
            fields.remove(name);
        }

        let all_optional = inherited_deep || self.partial != Partiality::None;
        fields
            .into_iter()
            .map(|(name, schema)| {
                let presence = if self.required.contains(&name) {
                    Some(Presence::Required)
                } else if all_optional {
                    Some(Presence::Optional)
                } else {
                    None
                };
                (name, FieldSlot { schema, presence })
            })
            .collect()
    }

    /// Effective field names, sorted.
    pub(crate) fn keyof(&self) -> Vec<String> {
        self.effective_fields(false).into_keys().collect()
    }

    pub(crate) fn check(&self, value: &Value, ctx: Context) -> Outcome {
        let Some(input) = value.as_object() else {
            return Outcome::fail(
                ValidationError::new(ErrorCode::InvalidType, "expected object").with_value(value.clone()),
            );
        };

        let deep = ctx.deep_partial || self.partial == Partiality::Deep;
        let fields = self.effective_fields(deep);
        let mut errors = Vec::new();
        let mut output = BTreeMap::new();

        for (name, slot) in &fields {
            let field_value = input.get(name).unwrap_or(&Value::Null);
            let field_ctx = Context {
                presence: slot.presence,
                deep_partial: deep,
            };
            let segment = PathSegment::Key(name.clone());
            match slot.schema.validate_in(field_value, field_ctx) {
                Outcome::Valid(Value::Null) => {}
                Outcome::Valid(normalized) => {
                    output.insert(name.clone(), normalized);
                }
                Outcome::Invalid(field_errors) => {
                    errors.extend(field_errors.into_iter().map(|e| e.at(&segment)));
                }
            }
        }

        let mut stripped = 0usize;
        for (name, raw) in input.iter().filter(|(name, _)| !fields.contains_key(*name)) {
            let segment = PathSegment::Key(name.clone());
            if self.unknown_keys == UnknownKeys::Strict {
                errors.push(
                    ValidationError::new(ErrorCode::UnrecognizedKeys, "unknown field")
                        .with_value(raw.clone())
                        .at(&segment),
                );
            } else if let Some(catchall) = &self.catchall {
                match catchall.validate_in(raw, ctx.child()) {
                    Outcome::Valid(normalized) => {
                        output.insert(name.clone(), normalized);
                    }
                    Outcome::Invalid(extra_errors) => {
                        errors.extend(extra_errors.into_iter().map(|e| e.at(&segment)));
                    }
                }
            } else if self.unknown_keys == UnknownKeys::Passthrough {
                output.insert(name.clone(), raw.clone());
            } else {
                stripped += 1;
            }
        }
        if stripped > 0 {
            tracing::debug!(stripped, "dropped unknown object keys");
        }

        if errors.is_empty() {
            Outcome::Valid(Value::Object(output))
        } else {
            Outcome::Invalid(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modality::Modality;
    use crate::schema::NodeKind;

    fn any() -> Schema {
        Schema::from_node(Modality::default(), NodeKind::Any)
    }

    fn shape(names: &[&str]) -> ObjectShape {
        ObjectShape {
            base: names.iter().map(|n| (n.to_string(), any())).collect(),
            ..ObjectShape::default()
        }
    }

    fn names(fields: &BTreeMap<String, FieldSlot>) -> Vec<&str> {
        fields.keys().map(String::as_str).collect()
    }

    #[test]
    fn merge_then_extend_overwrite_in_order() {
        let base_a = any();
        let merged_a = any();
        let extended_a = any();
        let mut s = ObjectShape::default();
        s.base.insert("a".into(), base_a);
        s.merged = Some(BTreeMap::from([("a".to_string(), merged_a.clone()), ("m".to_string(), any())]));
        let fields = s.effective_fields(false);
        assert!(fields["a"].schema.ptr_eq(&merged_a));

        s.extend.insert("a".into(), extended_a.clone());
        let fields = s.effective_fields(false);
        assert!(fields["a"].schema.ptr_eq(&extended_a));
        assert_eq!(names(&fields), ["a", "m"]);
    }

    #[test]
    fn pick_ignores_unknown_names() {
        let mut s = shape(&["a", "b", "c"]);
        s.pick = vec!["a".into(), "zzz".into()];
        assert_eq!(names(&s.effective_fields(false)), ["a"]);
    }

    #[test]
    fn omit_after_pick() {
        let mut s = shape(&["a", "b", "c"]);
        s.pick = vec!["a".into(), "b".into()];
        s.omit = vec!["b".into()];
        assert_eq!(names(&s.effective_fields(false)), ["a"]);
    }

    #[test]
    fn required_override_beats_partial() {
        let mut s = shape(&["a", "b"]);
        s.partial = Partiality::Shallow;
        s.required = vec!["a".into()];
        let fields = s.effective_fields(false);
        assert_eq!(fields["a"].presence, Some(Presence::Required));
        assert_eq!(fields["b"].presence, Some(Presence::Optional));
    }

    #[test]
    fn no_directives_means_no_override() {
        let fields = shape(&["a"]).effective_fields(false);
        assert_eq!(fields["a"].presence, None);
        let inherited = shape(&["a"]).effective_fields(true);
        assert_eq!(inherited["a"].presence, Some(Presence::Optional));
    }

    #[test]
    fn keyof_is_sorted_effective_names() {
        let mut s = shape(&["b", "a"]);
        s.extend.insert("c".into(), any());
        s.omit = vec!["b".into()];
        assert_eq!(s.keyof(), ["a", "c"]);
    }

    #[test]
    fn non_objects_are_rejected() {
        let outcome = shape(&["a"]).check(&Value::from("x"), Context::default());
        assert_eq!(outcome.errors()[0].message, "expected object");
        assert_eq!(outcome.errors()[0].code, ErrorCode::InvalidType);
    }
}
