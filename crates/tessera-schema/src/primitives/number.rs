//! # Number Leaf
//!
//! Accepts integers, floats and numeric strings (`"42"`, `"-1.5e3"`). All
//! checks run on the `f64` view of the input and every violation is
//! reported. Integer schemas normalize to `Value::Int`; all others to
//! `Value::Float`.
//!
//! Integer schemas keep `Value::Int` input and integral numeric strings
//! exact, so values beyond 2^53 are never rounded. A float or string that
//! is non-finite or outside the `i64` range is not an integer.

use tessera_core::{ErrorCode, ValidationError, Value};

use crate::leaf::LeafValidator;
use crate::modality::Modality;
use crate::schema::{NodeKind, Schema, SchemaBuilder};

/// Largest integer exactly representable in an `f64` (2^53 - 1).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Builder for number schemas.
#[derive(Debug)]
pub struct NumberSchema {
    modality: Modality,
    rules: NumberRules,
}

#[derive(Debug, Default)]
pub(crate) struct NumberRules {
    min: Option<f64>,
    max: Option<f64>,
    int: bool,
    positive: bool,
    negative: bool,
    nonnegative: bool,
    nonpositive: bool,
    finite: bool,
    safe: bool,
    multiple_of: Option<f64>,
}

impl NumberSchema {
    pub fn new() -> Self {
        Self {
            modality: Modality::default(),
            rules: NumberRules::default(),
        }
    }

    /// A number schema that also requires an integral value.
    pub fn integer() -> Self {
        let mut schema = Self::new();
        schema.rules.int = true;
        schema
    }

    /// Inclusive lower bound.
    pub fn min(mut self, value: f64) -> Self {
        self.rules.min = Some(value);
        self
    }

    /// Inclusive upper bound.
    pub fn max(mut self, value: f64) -> Self {
        self.rules.max = Some(value);
        self
    }

    pub fn int(mut self) -> Self {
        self.rules.int = true;
        self
    }

    pub fn positive(mut self) -> Self {
        self.rules.positive = true;
        self
    }

    pub fn negative(mut self) -> Self {
        self.rules.negative = true;
        self
    }

    pub fn nonnegative(mut self) -> Self {
        self.rules.nonnegative = true;
        self
    }

    pub fn nonpositive(mut self) -> Self {
        self.rules.nonpositive = true;
        self
    }

    pub fn finite(mut self) -> Self {
        self.rules.finite = true;
        self
    }

    /// Reject magnitudes beyond [`MAX_SAFE_INTEGER`].
    pub fn safe(mut self) -> Self {
        self.rules.safe = true;
        self
    }

    pub fn multiple_of(mut self, step: f64) -> Self {
        self.rules.multiple_of = Some(step);
        self
    }
}

impl SchemaBuilder for NumberSchema {
    fn modality_mut(&mut self) -> &mut Modality {
        &mut self.modality
    }
}

impl From<NumberSchema> for Schema {
    fn from(builder: NumberSchema) -> Self {
        Schema::from_node(builder.modality, NodeKind::Leaf(Box::new(builder.rules)))
    }
}

impl LeafValidator for NumberRules {
    fn expected(&self) -> &str {
        "number"
    }

    fn coerce(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Int(i) if self.int => Some(Value::Int(*i)),
            Value::Int(i) => Some(Value::Float(*i as f64)),
            Value::Float(x) => Some(Value::Float(*x)),
            Value::String(s) if self.int => match s.parse::<i64>() {
                Ok(i) => Some(Value::Int(i)),
                Err(_) => s.parse::<f64>().ok().map(Value::Float),
            },
            Value::String(s) => s.parse::<f64>().ok().map(Value::Float),
            _ => None,
        }
    }

    fn constraints(&self, normalized: &Value) -> Vec<ValidationError> {
        let Some(num) = normalized.as_f64() else {
            return Vec::new();
        };
        let mut errors = Vec::new();
        let mut fail = |code: ErrorCode, message: String| {
            errors.push(ValidationError::new(code, message).with_value(normalized.clone()));
        };

        if self.int && !is_integral(normalized) {
            fail(ErrorCode::InvalidType, "expected integer".into());
        }
        if let Some(min) = self.min.filter(|&min| num < min) {
            fail(ErrorCode::TooSmall, format!("number must be greater than or equal to {min}"));
        }
        if let Some(max) = self.max.filter(|&max| num > max) {
            fail(ErrorCode::TooBig, format!("number must be less than or equal to {max}"));
        }
        if self.positive && num <= 0.0 {
            fail(ErrorCode::TooSmall, "number must be positive".into());
        }
        if self.negative && num >= 0.0 {
            fail(ErrorCode::TooBig, "number must be negative".into());
        }
        if self.nonnegative && num < 0.0 {
            fail(ErrorCode::TooSmall, "number must be non-negative".into());
        }
        if self.nonpositive && num > 0.0 {
            fail(ErrorCode::TooBig, "number must be non-positive".into());
        }
        if self.finite && !num.is_finite() {
            fail(ErrorCode::InvalidType, "number must be finite".into());
        }
        let beyond_safe = match normalized {
            Value::Int(i) => i.unsigned_abs() > MAX_SAFE_INTEGER as u64,
            _ => num.abs() > MAX_SAFE_INTEGER,
        };
        if self.safe && beyond_safe {
            fail(ErrorCode::TooBig, "number must be a safe integer".into());
        }
        let off_step = |step: f64| match normalized {
            Value::Int(i) if step.fract() == 0.0 && step != 0.0 && step.abs() < I64_BOUND => {
                i.checked_rem(step as i64).is_some_and(|r| r != 0)
            }
            _ => num % step != 0.0,
        };
        if let Some(step) = self.multiple_of.filter(|&step| off_step(step)) {
            fail(ErrorCode::InvalidType, format!("number must be a multiple of {step}"));
        }
        errors
    }

    fn finish(&self, normalized: Value) -> Value {
        match normalized {
            // Only reached once `is_integral` held, so the cast is exact.
            Value::Float(num) if self.int => Value::Int(num as i64),
            other => other,
        }
    }
}

/// 2^63 as an `f64`; finite floats strictly inside `±2^63` fit an `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn is_integral(value: &Value) -> bool {
    match value {
        Value::Int(_) => true,
        Value::Float(x) => x.is_finite() && x.trunc() == *x && x.abs() < I64_BOUND,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::Outcome;

    fn check(schema: NumberSchema, input: impl Into<Value>) -> Outcome {
        schema.build().validate(&input.into())
    }

    #[test]
    fn accepts_ints_floats_and_numeric_strings() {
        assert_eq!(check(NumberSchema::new(), 42.5), Outcome::valid(42.5));
        assert_eq!(check(NumberSchema::new(), 30), Outcome::valid(30.0));
        assert_eq!(check(NumberSchema::new(), "12.5"), Outcome::valid(12.5));
        let outcome = check(NumberSchema::new(), "hello");
        assert_eq!(outcome.errors()[0].message, "expected number");
        assert!(!check(NumberSchema::new(), true).is_valid());
    }

    #[test]
    fn zero_is_present() {
        assert!(check(NumberSchema::new(), 0).is_valid());
    }

    #[test]
    fn bounds() {
        assert_eq!(check(NumberSchema::new().min(10.0), 5).errors()[0].code, ErrorCode::TooSmall);
        assert_eq!(check(NumberSchema::new().max(100.0), 150).errors()[0].code, ErrorCode::TooBig);
        assert!(check(NumberSchema::new().min(0.0).max(150.0), 150).is_valid());
        assert_eq!(
            check(NumberSchema::new().min(10.0), 5).errors()[0].message,
            "number must be greater than or equal to 10"
        );
    }

    #[test]
    fn sign_checks() {
        assert!(!check(NumberSchema::new().positive(), -5).is_valid());
        assert!(!check(NumberSchema::new().positive(), 0).is_valid());
        assert!(!check(NumberSchema::new().negative(), 0).is_valid());
        assert!(check(NumberSchema::new().nonnegative(), 0).is_valid());
        assert!(check(NumberSchema::new().nonpositive(), 0).is_valid());
        assert!(!check(NumberSchema::new().nonpositive(), 1).is_valid());
    }

    #[test]
    fn integer_schema_normalizes_to_int() {
        assert_eq!(check(NumberSchema::integer(), 42), Outcome::valid(42));
        assert_eq!(check(NumberSchema::integer(), "7"), Outcome::valid(7));
        let outcome = check(NumberSchema::integer(), 42.5);
        assert_eq!(outcome.errors()[0].message, "expected integer");
    }

    #[test]
    fn integer_schema_keeps_large_ints_exact() {
        let big = 9_007_199_254_740_993_i64;
        assert_eq!(check(NumberSchema::integer(), big), Outcome::valid(big));
        assert_eq!(check(NumberSchema::integer(), big.to_string()), Outcome::valid(big));
        assert_eq!(check(NumberSchema::integer(), i64::MAX), Outcome::valid(i64::MAX));
        assert!(!check(NumberSchema::integer().safe(), big).is_valid());
        assert!(check(NumberSchema::integer().multiple_of(3.0), 9_007_199_254_740_993_i64).is_valid());
    }

    #[test]
    fn integer_schema_rejects_non_finite_and_out_of_range() {
        for input in ["inf", "-inf", "NaN", "1e300"] {
            let outcome = check(NumberSchema::integer(), input);
            assert_eq!(outcome.errors()[0].code, ErrorCode::InvalidType, "{input}");
            assert_eq!(outcome.errors()[0].message, "expected integer", "{input}");
        }
        assert!(!check(NumberSchema::integer(), f64::INFINITY).is_valid());
        assert!(!check(NumberSchema::new().int(), 9.3e18).is_valid());
    }

    #[test]
    fn finite_safe_and_multiple_of() {
        assert!(!check(NumberSchema::new().finite(), f64::INFINITY).is_valid());
        assert!(!check(NumberSchema::new().finite(), "NaN").is_valid());
        assert!(!check(NumberSchema::new().safe(), 1e16).is_valid());
        assert!(check(NumberSchema::new().safe(), MAX_SAFE_INTEGER).is_valid());
        assert!(check(NumberSchema::new().multiple_of(5.0), 25).is_valid());
        assert!(!check(NumberSchema::new().multiple_of(5.0), 26).is_valid());
    }

    #[test]
    fn every_violation_is_reported() {
        let outcome = check(NumberSchema::integer().min(10.0).positive(), -1.5);
        let codes: Vec<ErrorCode> = outcome.errors().iter().map(|e| e.code).collect();
        assert_eq!(codes, [ErrorCode::InvalidType, ErrorCode::TooSmall, ErrorCode::TooSmall]);
    }
}
