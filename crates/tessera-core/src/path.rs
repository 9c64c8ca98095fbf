//! # Field Paths
//!
//! Composite nodes address child failures with a [`PathSegment`]. When an
//! error bubbles up through a composite, the composite prefixes its own
//! segment onto the error's `field`. Segments are joined so the final path
//! reads naturally:
//!
//! ```text
//! Key("address") + "zip"        -> "address.zip"
//! Key("items")   + "[2].name"   -> "items[2].name"
//! Index(0)       + "[1]"        -> "[0][1]"
//! Branch(1)      + ""           -> "union[1]"
//! ```
//!
//! A key that itself starts with `[` is rendered quoted, `["[0]"]`, so it
//! cannot be mistaken for an array index.

use std::fmt;

/// One step in a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object field name.
    Key(String),
    /// A position in an array or tuple.
    Index(usize),
    /// An alternative of a plain union.
    Branch(usize),
}

impl PathSegment {
    /// Prefix this segment onto an already-composed inner path.
    pub fn prefix(&self, inner: &str) -> String {
        let head = self.to_string();
        if inner.is_empty() {
            head
        } else if inner.starts_with('[') {
            format!("{head}{inner}")
        } else {
            format!("{head}.{inner}")
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(name) if name.starts_with('[') => write!(f, "[{name:?}]"),
            Self::Key(name) => f.write_str(name),
            Self::Index(i) => write!(f, "[{i}]"),
            Self::Branch(i) => write!(f, "union[{i}]"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        Self::Key(name.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_onto_root_is_bare_name() {
        assert_eq!(PathSegment::from("name").prefix(""), "name");
    }

    #[test]
    fn key_onto_key_uses_dot() {
        assert_eq!(PathSegment::from("address").prefix("zip"), "address.zip");
    }

    #[test]
    fn key_onto_index_has_no_dot() {
        assert_eq!(PathSegment::from("items").prefix("[2].name"), "items[2].name");
    }

    #[test]
    fn index_onto_index() {
        assert_eq!(PathSegment::Index(0).prefix("[1]"), "[0][1]");
    }

    #[test]
    fn bracketed_key_is_quoted() {
        let key = PathSegment::from("[0]");
        assert_eq!(key.to_string(), r#"["[0]"]"#);
        let nested = PathSegment::from("a").prefix(&key.prefix(""));
        assert_eq!(nested, r#"a["[0]"]"#);
        assert_ne!(nested, PathSegment::from("a").prefix(&PathSegment::Index(0).prefix("")));
    }

    #[test]
    fn branch_display() {
        assert_eq!(PathSegment::Branch(3).to_string(), "union[3]");
        assert_eq!(PathSegment::Branch(0).prefix("radius"), "union[0].radius");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn segment() -> impl Strategy<Value = PathSegment> {
        prop_oneof![
            "[a-z]{1,8}".prop_map(PathSegment::Key),
            (0usize..50).prop_map(PathSegment::Index),
            (0usize..5).prop_map(PathSegment::Branch),
        ]
    }

    proptest! {
        /// Every segment appears exactly once in the composed path, in
        /// outermost-first order.
        #[test]
        fn composition_prefixes_each_segment_once(
            segments in prop::collection::vec(segment(), 1..6)
        ) {
            let mut path = String::new();
            for seg in segments.iter().rev() {
                path = seg.prefix(&path);
            }
            let mut rest = path.as_str();
            for seg in &segments {
                let rendered = seg.to_string();
                let trimmed = rest.strip_prefix('.').unwrap_or(rest);
                prop_assert!(
                    trimmed.starts_with(&rendered),
                    "path {path:?} does not continue with {rendered:?} at {trimmed:?}"
                );
                rest = &trimmed[rendered.len()..];
            }
            prop_assert!(rest.is_empty());
        }
    }
}
