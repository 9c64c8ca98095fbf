//! # String Leaf
//!
//! Accepts only string values; nothing is coerced into a string. An
//! optional transform chain runs before any check, so `trim().min(1)`
//! rejects whitespace-only input. Lengths count characters, not bytes.

use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use tessera_core::{ErrorCode, ValidationError, Value};

use crate::error::SchemaError;
use crate::leaf::LeafValidator;
use crate::modality::Modality;
use crate::schema::{NodeKind, Schema, SchemaBuilder};

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// Hyphenated UUID text length (`8-4-4-4-12`).
const UUID_HYPHENATED_LEN: usize = 36;

type Transform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Builder for string schemas.
#[derive(Debug)]
pub struct StringSchema {
    modality: Modality,
    rules: StringRules,
}

#[derive(Default)]
pub(crate) struct StringRules {
    min: Option<usize>,
    max: Option<usize>,
    pattern: Option<Regex>,
    email: bool,
    url: bool,
    uuid: bool,
    transforms: Vec<Transform>,
}

impl StringSchema {
    pub fn new() -> Self {
        Self {
            modality: Modality::default(),
            rules: StringRules::default(),
        }
    }

    /// Minimum length in characters.
    pub fn min(mut self, length: usize) -> Self {
        self.rules.min = Some(length);
        self
    }

    /// Maximum length in characters.
    pub fn max(mut self, length: usize) -> Self {
        self.rules.max = Some(length);
        self
    }

    /// Exact length in characters.
    pub fn length(self, length: usize) -> Self {
        self.min(length).max(length)
    }

    /// Require a match against `pattern`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidPattern` if the pattern does not compile.
    pub fn regex(self, pattern: &str) -> Result<Self, SchemaError> {
        let re = Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(self.pattern(re))
    }

    /// Require a match against an already-compiled regex.
    pub fn pattern(mut self, re: Regex) -> Self {
        self.rules.pattern = Some(re);
        self
    }

    pub fn email(mut self) -> Self {
        self.rules.email = true;
        self
    }

    /// Require an absolute `http` or `https` URL with a host.
    pub fn url(mut self) -> Self {
        self.rules.url = true;
        self
    }

    /// Require a hyphenated UUID (any case).
    pub fn uuid(mut self) -> Self {
        self.rules.uuid = true;
        self
    }

    /// Append a transform. Transforms run in the order they were added.
    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.rules.transforms.push(Arc::new(f));
        self
    }

    pub fn trim(self) -> Self {
        self.transform(|s| s.trim().to_string())
    }

    pub fn to_lower(self) -> Self {
        self.transform(str::to_lowercase)
    }

    pub fn to_upper(self) -> Self {
        self.transform(str::to_uppercase)
    }
}

impl SchemaBuilder for StringSchema {
    fn modality_mut(&mut self) -> &mut Modality {
        &mut self.modality
    }
}

impl From<StringSchema> for Schema {
    fn from(builder: StringSchema) -> Self {
        Schema::from_node(builder.modality, NodeKind::Leaf(Box::new(builder.rules)))
    }
}

impl LeafValidator for StringRules {
    fn expected(&self) -> &str {
        "string"
    }

    fn coerce(&self, value: &Value) -> Option<Value> {
        let s = value.as_str()?;
        let transformed = self
            .transforms
            .iter()
            .fold(s.to_string(), |acc, f| f(&acc));
        Some(Value::String(transformed))
    }

    fn constraints(&self, normalized: &Value) -> Vec<ValidationError> {
        let Some(s) = normalized.as_str() else {
            return Vec::new();
        };
        let length = s.chars().count();
        let mut errors = Vec::new();
        let mut fail = |code: ErrorCode, message: String| {
            errors.push(ValidationError::new(code, message).with_value(s));
        };

        if let Some(min) = self.min.filter(|&min| length < min) {
            fail(ErrorCode::TooSmall, format!("string must be at least {min} characters"));
        }
        if let Some(max) = self.max.filter(|&max| length > max) {
            fail(ErrorCode::TooBig, format!("string must be at most {max} characters"));
        }
        if self.pattern.as_ref().is_some_and(|re| !re.is_match(s)) {
            fail(ErrorCode::InvalidString, "string does not match required pattern".into());
        }
        if self.email && !is_valid_email(s) {
            fail(ErrorCode::InvalidString, "invalid email format".into());
        }
        if self.url && !is_valid_url(s) {
            fail(ErrorCode::InvalidString, "invalid URL format".into());
        }
        if self.uuid && !is_valid_uuid(s) {
            fail(ErrorCode::InvalidString, "invalid UUID format".into());
        }
        errors
    }
}

impl fmt::Debug for StringRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringRules")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("email", &self.email)
            .field("url", &self.url)
            .field("uuid", &self.uuid)
            .field("transforms", &self.transforms.len())
            .finish()
    }
}

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).ok()).as_ref()
}

fn is_valid_email(s: &str) -> bool {
    email_regex().is_some_and(|re| re.is_match(s))
}

fn is_valid_url(s: &str) -> bool {
    match url::Url::parse(s) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|h| !h.is_empty())
                && !s.chars().any(char::is_whitespace)
        }
        Err(_) => false,
    }
}

fn is_valid_uuid(s: &str) -> bool {
    s.len() == UUID_HYPHENATED_LEN && uuid::Uuid::try_parse(s).is_ok()
}
