//! # Validation Outcomes
//!
//! Every schema node returns an [`Outcome`]: either the accepted value,
//! possibly normalized (coerced, transformed, defaulted), or the complete
//! list of reasons it was rejected.

use crate::error::{ValidationError, ValidationFailure};
use crate::path::PathSegment;
use crate::value::Value;

/// Result of validating one value against one schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Accepted; holds the normalized value.
    Valid(Value),
    /// Rejected; holds every violation found, in report order.
    Invalid(Vec<ValidationError>),
}

impl Outcome {
    pub fn valid(value: impl Into<Value>) -> Self {
        Self::Valid(value.into())
    }

    /// A rejection carrying exactly one error.
    pub fn fail(error: ValidationError) -> Self {
        Self::Invalid(vec![error])
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The normalized value, if accepted.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Valid(v) => Some(v),
            Self::Invalid(_) => None,
        }
    }

    /// The violations, empty if accepted.
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::Valid(_) => &[],
            Self::Invalid(errors) => errors,
        }
    }

    /// Re-tag every error as having occurred beneath `segment`.
    pub fn at(self, segment: &PathSegment) -> Self {
        match self {
            Self::Valid(v) => Self::Valid(v),
            Self::Invalid(errors) => {
                Self::Invalid(errors.into_iter().map(|e| e.at(segment)).collect())
            }
        }
    }

    /// The combined human-readable error, `None` when accepted.
    pub fn error(&self) -> Option<ValidationFailure> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(errors) => Some(ValidationFailure::new(errors.clone())),
        }
    }

    /// Convert into a `Result`, for callers that propagate with `?`.
    ///
    /// # Errors
    ///
    /// Returns the combined [`ValidationFailure`] if the value was rejected.
    pub fn into_result(self) -> Result<Value, ValidationFailure> {
        match self {
            Self::Valid(v) => Ok(v),
            Self::Invalid(errors) => Err(ValidationFailure::new(errors)),
        }
    }
}

impl From<Outcome> for Result<Value, ValidationFailure> {
    fn from(outcome: Outcome) -> Self {
        outcome.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn valid_outcome_has_no_error() {
        let outcome = Outcome::valid(42);
        assert!(outcome.is_valid());
        assert_eq!(outcome.value(), Some(&Value::Int(42)));
        assert!(outcome.errors().is_empty());
        assert!(outcome.error().is_none());
    }

    #[test]
    fn invalid_outcome_reports_combined_error() {
        let outcome = Outcome::fail(ValidationError::new(ErrorCode::InvalidType, "expected string"));
        assert!(!outcome.is_valid());
        assert!(outcome.value().is_none());
        let err = outcome.error().unwrap();
        assert_eq!(err.to_string(), "validation failed: expected string");
    }

    #[test]
    fn at_retags_errors_only() {
        let outcome = Outcome::fail(ValidationError::required()).at(&PathSegment::Index(4));
        assert_eq!(outcome.errors()[0].field, "[4]");
        let ok = Outcome::valid("x").at(&PathSegment::Index(4));
        assert_eq!(ok, Outcome::valid("x"));
    }

    #[test]
    fn into_result_propagates_with_question_mark() {
        fn run(outcome: Outcome) -> Result<Value, ValidationFailure> {
            let value = outcome.into_result()?;
            Ok(value)
        }
        assert!(run(Outcome::valid(true)).is_ok());
        let err = run(Outcome::fail(ValidationError::required())).unwrap_err();
        assert_eq!(err.errors()[0].code, ErrorCode::Required);
    }
}
