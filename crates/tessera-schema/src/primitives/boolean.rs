//! # Boolean Leaf
//!
//! Accepts booleans plus the usual loosely-typed spellings: the strings
//! `true/false/t/f/1/0/yes/no/y/n` (any case) and numbers equal to `0` or
//! `1`. Always normalizes to `Value::Bool`.

use tessera_core::Value;

use crate::leaf::LeafValidator;
use crate::modality::Modality;
use crate::schema::{NodeKind, Schema, SchemaBuilder};

/// Builder for boolean schemas.
#[derive(Debug)]
pub struct BooleanSchema {
    modality: Modality,
}

#[derive(Debug)]
pub(crate) struct BooleanRules;

impl BooleanSchema {
    pub fn new() -> Self {
        Self {
            modality: Modality::default(),
        }
    }
}

impl SchemaBuilder for BooleanSchema {
    fn modality_mut(&mut self) -> &mut Modality {
        &mut self.modality
    }
}

impl From<BooleanSchema> for Schema {
    fn from(builder: BooleanSchema) -> Self {
        Schema::from_node(builder.modality, NodeKind::Leaf(Box::new(BooleanRules)))
    }
}

impl LeafValidator for BooleanRules {
    fn expected(&self) -> &str {
        "boolean"
    }

    fn coerce(&self, value: &Value) -> Option<Value> {
        let b = match value {
            Value::Bool(b) => *b,
            Value::String(s) => match s.to_lowercase().as_str() {
                "true" | "t" | "1" | "yes" | "y" => true,
                "false" | "f" | "0" | "no" | "n" => false,
                _ => return None,
            },
            Value::Int(0) => false,
            Value::Int(1) => true,
            Value::Float(x) if *x == 0.0 => false,
            Value::Float(x) if *x == 1.0 => true,
            _ => return None,
        };
        Some(Value::Bool(b))
    }
}
