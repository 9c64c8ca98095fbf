//! # Nil / Default / Required Resolution
//!
//! Every node carries a [`Modality`]: whether an absent value is an error
//! ([`Presence::Required`]), acceptable as `Null` ([`Presence::Optional`]),
//! or replaced by a default.
//!
//! ## Resolution Order
//!
//! For an absent (`Null`) input the checks run in a fixed order and the
//! first that applies settles the outcome:
//!
//! 1. A default is set → `Valid(default)`. The default is trusted verbatim
//!    and is not re-validated against the node's constraints.
//! 2. The node is optional → `Valid(Null)`.
//! 3. Otherwise → a single `required` error.
//!
//! `optional()` and `required()` are mutually exclusive: the last call wins.
//! Setting a default leaves presence untouched; the default simply wins at
//! resolution time.
//!
//! Present values are never touched here; they flow on to type-specific
//! validation.

use tessera_core::{ErrorCode, Outcome, ValidationError, Value};

/// Whether an absent value is acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presence {
    #[default]
    Required,
    Optional,
}

/// How a node kind treats absence once no default applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AbsentPolicy {
    /// Optional → `Null`, required → `required` error.
    Standard,
    /// `Null` is itself an accepted value (nullable nodes).
    AcceptNull,
    /// Required absence is reported as the never-type error.
    Never,
}

/// The presence/default facts every node carries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Modality {
    presence: Presence,
    default: Option<Value>,
}

impl Modality {
    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn is_optional(&self) -> bool {
        self.presence == Presence::Optional
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub(crate) fn set_presence(&mut self, presence: Presence) {
        self.presence = presence;
    }

    pub(crate) fn set_default(&mut self, value: Value) {
        self.default = Some(value);
    }

    /// Settle the outcome for an absent value.
    ///
    /// `presence` is the effective presence for this call, which an
    /// enclosing object may have overridden (partial / required fields).
    pub(crate) fn resolve_absent(&self, presence: Presence, policy: AbsentPolicy) -> Outcome {
        if let Some(default) = &self.default {
            return Outcome::Valid(default.clone());
        }
        match (policy, presence) {
            (AbsentPolicy::AcceptNull, _) | (_, Presence::Optional) => Outcome::Valid(Value::Null),
            (AbsentPolicy::Never, Presence::Required) => Outcome::fail(never_error(&Value::Null)),
            (AbsentPolicy::Standard, Presence::Required) => Outcome::fail(ValidationError::required()),
        }
    }
}

/// The error the never type reports for any input.
pub(crate) fn never_error(value: &Value) -> ValidationError {
    ValidationError::new(ErrorCode::InvalidType, "never type should never be used")
        .with_value(value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modality(presence: Presence, default: Option<Value>) -> Modality {
        Modality { presence, default }
    }

    #[test]
    fn required_absent_is_an_error() {
        let m = Modality::default();
        let outcome = m.resolve_absent(m.presence(), AbsentPolicy::Standard);
        assert_eq!(outcome.errors()[0].code, ErrorCode::Required);
        assert_eq!(outcome.errors()[0].message, "field is required");
    }

    #[test]
    fn optional_absent_is_null() {
        let m = modality(Presence::Optional, None);
        assert_eq!(m.resolve_absent(m.presence(), AbsentPolicy::Standard), Outcome::Valid(Value::Null));
    }

    #[test]
    fn default_wins_over_required_and_optional() {
        for presence in [Presence::Required, Presence::Optional] {
            let m = modality(presence, Some(Value::from("en")));
            assert_eq!(
                m.resolve_absent(presence, AbsentPolicy::Standard),
                Outcome::Valid(Value::from("en"))
            );
        }
    }

    #[test]
    fn default_wins_over_nullable_and_never() {
        let m = modality(Presence::Required, Some(Value::Int(0)));
        assert_eq!(m.resolve_absent(Presence::Required, AbsentPolicy::AcceptNull), Outcome::Valid(Value::Int(0)));
        assert_eq!(m.resolve_absent(Presence::Required, AbsentPolicy::Never), Outcome::Valid(Value::Int(0)));
    }

    #[test]
    fn overridden_presence_takes_effect() {
        let m = Modality::default();
        assert!(m.resolve_absent(Presence::Optional, AbsentPolicy::Standard).is_valid());
        let opt = modality(Presence::Optional, None);
        assert!(!opt.resolve_absent(Presence::Required, AbsentPolicy::Standard).is_valid());
    }

    #[test]
    fn nullable_accepts_absence_even_when_required() {
        let m = Modality::default();
        assert_eq!(m.resolve_absent(Presence::Required, AbsentPolicy::AcceptNull), Outcome::Valid(Value::Null));
    }

    #[test]
    fn never_reports_invalid_type() {
        let m = Modality::default();
        let outcome = m.resolve_absent(Presence::Required, AbsentPolicy::Never);
        assert_eq!(outcome.errors()[0].code, ErrorCode::InvalidType);
        let optional = m.resolve_absent(Presence::Optional, AbsentPolicy::Never);
        assert!(optional.is_valid());
    }

    #[test]
    fn last_presence_call_wins() {
        let mut m = Modality::default();
        m.set_presence(Presence::Optional);
        m.set_presence(Presence::Required);
        assert!(m.is_required());
        assert!(!m.is_optional());
        m.set_default(Value::Bool(true));
        assert!(m.is_required(), "default must not clear presence");
        assert!(m.has_default());
    }
}
