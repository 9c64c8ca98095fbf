//! # Date Leaf
//!
//! Accepts `Value::Date`, RFC 3339 strings and plain `YYYY-MM-DD` strings
//! (read as midnight UTC). A mismatch is reported as `invalid_date` rather
//! than `invalid_type`.

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use tessera_core::{ErrorCode, ValidationError, Value};

use crate::leaf::LeafValidator;
use crate::modality::Modality;
use crate::schema::{NodeKind, Schema, SchemaBuilder};

/// Builder for date schemas.
#[derive(Debug)]
pub struct DateSchema {
    modality: Modality,
    rules: DateRules,
}

#[derive(Debug, Default)]
pub(crate) struct DateRules {
    min: Option<DateTime<Utc>>,
    max: Option<DateTime<Utc>>,
}

impl DateSchema {
    pub fn new() -> Self {
        Self {
            modality: Modality::default(),
            rules: DateRules::default(),
        }
    }

    /// Reject dates before `date`.
    pub fn min(mut self, date: DateTime<Utc>) -> Self {
        self.rules.min = Some(date);
        self
    }

    /// Reject dates after `date`.
    pub fn max(mut self, date: DateTime<Utc>) -> Self {
        self.rules.max = Some(date);
        self
    }
}

impl SchemaBuilder for DateSchema {
    fn modality_mut(&mut self) -> &mut Modality {
        &mut self.modality
    }
}

impl From<DateSchema> for Schema {
    fn from(builder: DateSchema) -> Self {
        Schema::from_node(builder.modality, NodeKind::Leaf(Box::new(builder.rules)))
    }
}

fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let day = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0)?))
}

fn rfc3339(d: &DateTime<Utc>) -> String {
    d.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl LeafValidator for DateRules {
    fn expected(&self) -> &str {
        "valid date"
    }

    fn mismatch_code(&self) -> ErrorCode {
        ErrorCode::InvalidDate
    }

    fn coerce(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Date(d) => Some(Value::Date(*d)),
            Value::String(s) => parse_date(s).map(Value::Date),
            _ => None,
        }
    }

    fn constraints(&self, normalized: &Value) -> Vec<ValidationError> {
        let Some(date) = normalized.as_date() else {
            return Vec::new();
        };
        let mut errors = Vec::new();
        if let Some(min) = self.min.filter(|min| date < min) {
            errors.push(
                ValidationError::new(ErrorCode::TooSmall, format!("date must be after {}", rfc3339(&min)))
                    .with_value(*date),
            );
        }
        if let Some(max) = self.max.filter(|max| date > max) {
            errors.push(
                ValidationError::new(ErrorCode::TooBig, format!("date must be before {}", rfc3339(&max)))
                    .with_value(*date),
            );
        }
        errors
    }
}
