//! # Schema Catalog
//!
//! The reference schemas the CLI can validate against. Each entry is built
//! on demand; building can only fail if a pattern does not compile.
//!
//! | Name            | Shape                                               |
//! |-----------------|-----------------------------------------------------|
//! | `user`          | Nested object with defaults, enums and formats      |
//! | `api-request`   | Passthrough headers, union-typed body               |
//! | `shape`         | Discriminated union on `type`                       |
//! | `todo-list`     | Array of objects with per-item defaults             |
//! | `blog-post`     | Four levels of nesting, optional comment array      |
//! | `coordinate`    | Fixed three-number tuple                            |
//! | `csv-row`       | Tuple with a string-or-number rest                  |
//! | `category-tree` | Self-referential tree through a lazy schema         |

use std::sync::OnceLock;

use chrono::Utc;
use tessera_schema::prelude::*;
use tessera_schema::SchemaError;

/// A named, buildable catalog schema.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub summary: &'static str,
    build: fn() -> Result<Schema, SchemaError>,
}

impl CatalogEntry {
    /// Build the schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if one of the entry's patterns fails to compile.
    pub fn schema(&self) -> Result<Schema, SchemaError> {
        (self.build)()
    }
}

const ENTRIES: &[CatalogEntry] = &[
    CatalogEntry {
        name: "user",
        summary: "user account with profile, settings and role",
        build: user,
    },
    CatalogEntry {
        name: "api-request",
        summary: "HTTP request envelope with passthrough headers",
        build: api_request,
    },
    CatalogEntry {
        name: "shape",
        summary: "circle, rectangle or triangle selected by `type`",
        build: shape,
    },
    CatalogEntry {
        name: "todo-list",
        summary: "titled list of todo items",
        build: todo_list,
    },
    CatalogEntry {
        name: "blog-post",
        summary: "post with author profile, tags and comment metadata",
        build: blog_post,
    },
    CatalogEntry {
        name: "coordinate",
        summary: "[x, y, z] number tuple",
        build: coordinate,
    },
    CatalogEntry {
        name: "csv-row",
        summary: "first and last name followed by any strings or numbers",
        build: csv_row,
    },
    CatalogEntry {
        name: "category-tree",
        summary: "named categories nested to any depth",
        build: category_tree,
    },
];

/// Every catalog entry, in listing order.
pub fn entries() -> &'static [CatalogEntry] {
    ENTRIES
}

/// Look up an entry by name.
pub fn lookup(name: &str) -> Option<&'static CatalogEntry> {
    ENTRIES.iter().find(|entry| entry.name == name)
}

fn user() -> Result<Schema, SchemaError> {
    Ok(object()
        .field("id", int().positive())
        .field("username", string().min(3).max(50).regex(r"^[a-zA-Z0-9_]+$")?)
        .field("email", string().email())
        .field("age", int().min(13.0).max(120.0).optional())
        .field("bio", string().max(500).optional())
        .field("website", string().url().optional())
        .field("isActive", boolean().default(true))
        .field("tags", array(string()).min(1).max(10))
        .field("role", enumeration(["user", "admin", "moderator"]))
        .field(
            "profile",
            object()
                .field("firstName", string().min(1).max(50))
                .field("lastName", string().min(1).max(50))
                .field("avatar", string().url().optional())
                .field("birthDate", date().max(Utc::now())),
        )
        .field(
            "settings",
            object()
                .field("notifications", boolean().default(true))
                .field("theme", enumeration(["light", "dark"]).default("light"))
                .field("language", string().default("en")),
        )
        .build())
}

fn api_request() -> Result<Schema, SchemaError> {
    let body = union([
        object().passthrough().build(),
        string().build(),
        array(any()).build(),
    ]);
    Ok(object()
        .field("method", enumeration(["GET", "POST", "PUT", "DELETE"]))
        .field("path", string().regex(r"^/[a-zA-Z0-9/_-]*$")?)
        .field("query", object().passthrough().optional())
        .field("body", body.optional())
        .field(
            "headers",
            object()
                .field("Content-Type", string().optional())
                .field(
                    "Authorization",
                    string().regex(r"^Bearer [a-zA-Z0-9._-]+$")?.optional(),
                )
                .passthrough(),
        )
        .build())
}

fn shape() -> Result<Schema, SchemaError> {
    Ok(discriminated_union("type")
        .option(
            "circle",
            object()
                .field("type", literal("circle"))
                .field("radius", number().positive()),
        )
        .option(
            "rectangle",
            object()
                .field("type", literal("rectangle"))
                .field("width", number().positive())
                .field("height", number().positive()),
        )
        .option(
            "triangle",
            object()
                .field("type", literal("triangle"))
                .field("base", number().positive())
                .field("height", number().positive()),
        )
        .build())
}

fn todo_list() -> Result<Schema, SchemaError> {
    let item = object()
        .field("id", int().positive())
        .field("text", string().min(1).max(500))
        .field("completed", boolean().default(false))
        .field("priority", enumeration(["low", "medium", "high"]).default("medium"))
        .field("tags", array(string()).max(5).optional());
    Ok(object()
        .field("title", string().min(1).max(100))
        .field("items", array(item).min(1).max(100))
        .field("created", date())
        .build())
}

fn blog_post() -> Result<Schema, SchemaError> {
    let social = object()
        .field("twitter", string().regex(r"^@[a-zA-Z0-9_]+$")?.optional())
        .field("linkedin", string().url().optional())
        .field("github", string().regex(r"^[a-zA-Z0-9_-]+$")?.optional());
    let author = object()
        .field("id", int().positive())
        .field("name", string().min(1).max(100))
        .field("email", string().email())
        .field(
            "profile",
            object()
                .field("bio", string().max(500).optional())
                .field("avatar", string().url().optional())
                .field("social", social.optional()),
        );
    let comment = object()
        .field("id", int().positive())
        .field("author", string().min(1).max(100))
        .field("content", string().min(1).max(1000))
        .field("created", date());
    Ok(object()
        .field("title", string().min(1).max(200))
        .field("content", string().min(1))
        .field("author", author)
        .field("tags", array(string().min(1).max(50)).max(10))
        .field("published", boolean().default(false))
        .field(
            "metadata",
            object()
                .field("created", date())
                .field("updated", date().optional())
                .field("views", int().nonnegative().default(0))
                .field("likes", int().nonnegative().default(0))
                .field("comments", array(comment).optional()),
        )
        .build())
}

fn coordinate() -> Result<Schema, SchemaError> {
    Ok(tuple([number(), number(), number()]).build())
}

fn csv_row() -> Result<Schema, SchemaError> {
    Ok(tuple([string(), string()])
        .rest(union([string().build(), number().build()]))
        .build())
}

fn category_node() -> Schema {
    static NODE: OnceLock<Schema> = OnceLock::new();
    NODE.get_or_init(|| {
        object()
            .field("name", string().min(1))
            .field("subcategories", array(lazy(category_node)).optional())
            .build()
    })
    .clone()
}

fn category_tree() -> Result<Schema, SchemaError> {
    Ok(category_node())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(name: &str, input: serde_json::Value) -> Outcome {
        let schema = lookup(name).unwrap().schema().unwrap();
        schema.validate(&Value::from(input))
    }

    #[test]
    fn every_entry_builds() {
        for entry in entries() {
            assert!(entry.schema().is_ok(), "{} failed to build", entry.name);
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<&str> = entries().iter().map(|e| e.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), entries().len());
    }

    #[test]
    fn unknown_name() {
        assert!(lookup("nope").is_none());
    }

    #[test]
    fn user_accepts_reference_document() {
        let outcome = validate(
            "user",
            json!({
                "id": 123,
                "username": "john_doe",
                "email": "john@example.com",
                "age": 30,
                "bio": "Software developer",
                "isActive": true,
                "tags": ["developer", "rust"],
                "role": "user",
                "profile": {
                    "firstName": "John",
                    "lastName": "Doe",
                    "avatar": "https://example.com/avatar.jpg",
                    "birthDate": "1993-01-01"
                },
                "settings": {"notifications": true, "theme": "dark", "language": "en"}
            }),
        );
        assert!(outcome.is_valid(), "{:?}", outcome.errors());
    }

    #[test]
    fn shape_reports_missing_radius() {
        let outcome = validate("shape", json!({"type": "circle"}));
        assert_eq!(
            outcome.error().unwrap().to_string(),
            "validation failed: radius: field is required"
        );
    }

    #[test]
    fn todo_items_get_defaults() {
        let outcome = validate(
            "todo-list",
            json!({
                "title": "My Todo List",
                "items": [{"id": 1, "text": "Ship"}],
                "created": "2024-05-01T09:00:00Z"
            }),
        );
        let items = outcome.value().and_then(|v| v.get("items")).unwrap();
        assert_eq!(
            items,
            &Value::from(json!([{"id": 1, "text": "Ship", "completed": false, "priority": "medium"}]))
        );
    }

    #[test]
    fn blog_post_metadata_defaults() {
        let outcome = validate(
            "blog-post",
            json!({
                "title": "Validation",
                "content": "A guide",
                "author": {"id": 1, "name": "Jo", "email": "jo@example.com", "profile": {}},
                "tags": [],
                "metadata": {"created": "2024-01-01"}
            }),
        );
        let metadata = outcome.value().and_then(|v| v.get("metadata")).unwrap();
        assert_eq!(metadata.get("views"), Some(&Value::Int(0)));
    }

    #[test]
    fn tuples() {
        assert!(validate("coordinate", json!([10.5, 20.3, 5.0])).is_valid());
        assert!(!validate("coordinate", json!([10.5, 20.3])).is_valid());
        assert!(validate("csv-row", json!(["John", "Doe", 30, "Engineer", "Active"])).is_valid());
    }

    #[test]
    fn category_tree_recurses() {
        let outcome = validate(
            "category-tree",
            json!({"name": "root", "subcategories": [{"name": "a", "subcategories": [{"name": ""}]}]}),
        );
        assert_eq!(outcome.errors()[0].field, "subcategories[0].subcategories[0].name");
    }
}
