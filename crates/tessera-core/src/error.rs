//! # Error Types: Validation Vocabulary
//!
//! Validation failures are data, not exceptions: every rejected value yields
//! an ordered list of [`ValidationError`]s, each carrying a field path, a
//! human-readable message, a stable [`ErrorCode`] and the offending input.
//!
//! Two `thiserror` types sit around that vocabulary:
//!
//! - [`ValidationFailure`]: the combined, displayable error produced from an
//!   invalid [`Outcome`](crate::Outcome), rendered as
//!   `validation failed: a: msg; b: msg`.
//! - [`ValueError`]: failures while loading a document into a
//!   [`Value`](crate::Value) in the first place.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::path::PathSegment;
use crate::value::Value;

/// Stable machine-readable classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Absent value with no default on a non-optional node.
    Required,
    /// Wrong shape or kind, including tuple length and the never type.
    InvalidType,
    /// Lower bound violated (length, numeric range, date range).
    TooSmall,
    /// Upper bound violated (length, numeric range, date range).
    TooBig,
    /// Pattern, email, URL or UUID format violated.
    InvalidString,
    InvalidDate,
    InvalidLiteral,
    InvalidEnumValue,
    /// No union alternative matched, or discriminant missing/unknown.
    InvalidUnion,
    /// Key not declared on a strict object.
    UnrecognizedKeys,
}

impl ErrorCode {
    /// The snake_case wire name of this code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidType => "invalid_type",
            Self::TooSmall => "too_small",
            Self::TooBig => "too_big",
            Self::InvalidString => "invalid_string",
            Self::InvalidDate => "invalid_date",
            Self::InvalidLiteral => "invalid_literal",
            Self::InvalidEnumValue => "invalid_enum_value",
            Self::InvalidUnion => "invalid_union",
            Self::UnrecognizedKeys => "unrecognized_keys",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-addressed validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Composed path to the failing value; empty at the root.
    pub field: String,
    /// Human-readable description.
    pub message: String,
    pub code: ErrorCode,
    /// The offending input, `Null` when the value was absent.
    pub value: Value,
    /// Per-alternative errors behind a plain-union summary error, each
    /// tagged `union[i]`. Empty for every other error.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<ValidationError>,
}

impl ValidationError {
    /// Create a root-level error with no offending value attached.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            field: String::new(),
            message: message.into(),
            code,
            value: Value::Null,
            causes: Vec::new(),
        }
    }

    /// The error every node reports for an absent, non-optional value.
    pub fn required() -> Self {
        Self::new(ErrorCode::Required, "field is required")
    }

    /// Attach the offending input.
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// Attach the underlying errors of a summary error.
    pub fn with_causes(mut self, causes: Vec<ValidationError>) -> Self {
        self.causes = causes;
        self
    }

    /// Re-tag this error as having occurred beneath `segment`.
    pub fn at(mut self, segment: &PathSegment) -> Self {
        self.field = segment.prefix(&self.field);
        self
    }

    /// Returns true if the error addresses the validated value itself.
    pub fn is_root(&self) -> bool {
        self.field.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// The combined error for a rejected value.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("validation failed: {}", join_errors(.errors))]
pub struct ValidationFailure {
    errors: Vec<ValidationError>,
}

impl ValidationFailure {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// Returns the individual errors in report order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<ValidationError> {
        self.errors
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error while turning external data into a [`Value`].
#[derive(Error, Debug)]
pub enum ValueError {
    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The text is not valid YAML.
    #[cfg(feature = "yaml")]
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The YAML document uses constructs with no JSON equivalent.
    #[error("YAML-to-JSON conversion failed: {0}")]
    YamlConversion(String),

    /// A `Serialize` implementation failed while lifting a Rust value.
    #[error("serialization failed: {0}")]
    Serialization(serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_omits_empty_field() {
        let err = ValidationError::new(ErrorCode::InvalidType, "expected object");
        assert_eq!(err.to_string(), "expected object");
    }

    #[test]
    fn display_prefixes_field() {
        let err = ValidationError::required().at(&PathSegment::from("radius"));
        assert_eq!(err.to_string(), "radius: field is required");
        assert_eq!(err.code, ErrorCode::Required);
    }

    #[test]
    fn at_composes_nested_paths() {
        let err = ValidationError::new(ErrorCode::InvalidString, "invalid email format")
            .at(&PathSegment::from("email"))
            .at(&PathSegment::Index(1))
            .at(&PathSegment::from("users"));
        assert_eq!(err.field, "users[1].email");
    }

    #[test]
    fn failure_joins_messages() {
        let failure = ValidationFailure::new(vec![
            ValidationError::required().at(&PathSegment::from("name")),
            ValidationError::new(ErrorCode::TooSmall, "array must not be empty"),
        ]);
        assert_eq!(
            failure.to_string(),
            "validation failed: name: field is required; array must not be empty"
        );
        assert_eq!(failure.len(), 2);
    }

    #[test]
    fn codes_serialize_snake_case() {
        let json = serde_json::to_string(&ErrorCode::InvalidEnumValue).unwrap();
        assert_eq!(json, r#""invalid_enum_value""#);
        assert_eq!(ErrorCode::UnrecognizedKeys.to_string(), "unrecognized_keys");
    }

    #[test]
    fn causes_are_skipped_when_empty() {
        let err = ValidationError::required();
        let json = serde_json::to_value(&err).unwrap();
        assert!(json.get("causes").is_none());
        assert_eq!(json["code"], "required");
        assert_eq!(json["value"], serde_json::Value::Null);
    }
}
