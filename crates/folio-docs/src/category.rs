//! Per-directory category configuration.
//!
//! A category directory may carry a small JSON file (default
//! `_category.json`) with a display name and sort order:
//!
//! ```json
//! { "name": "Getting Started", "order": 0 }
//! ```
//!
//! The file is optional. When it is missing or cannot be parsed the name is
//! derived from the directory name and the order is 0. Each field falls back
//! on its own when it is absent or has the wrong type.

use serde_json::Value;

use crate::frontmatter::float_to_i64;

/// Resolved display name and sort order of a category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryConfig {
    pub name: String,
    pub order: i64,
}

impl CategoryConfig {
    /// Defaults for a directory without a usable config file.
    #[must_use]
    pub fn derived(dir_name: &str) -> Self {
        Self {
            name: derive_category_name(dir_name),
            order: 0,
        }
    }

    /// Parse config file content, filling missing fields from `dir_name`.
    ///
    /// Returns `None` if the content is not a JSON object. A `name` that is
    /// not a string, or an `order` that is not an integral number, is
    /// replaced by its default.
    #[must_use]
    pub fn parse(content: &str, dir_name: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(content).ok()?;
        let file = value.as_object()?;

        let name = file
            .get("name")
            .and_then(Value::as_str)
            .map_or_else(|| derive_category_name(dir_name), str::to_owned);
        let order = file
            .get("order")
            .and_then(|order| order.as_i64().or_else(|| order.as_f64().and_then(float_to_i64)))
            .unwrap_or(0);

        Some(Self { name, order })
    }
}

/// Derive a display name from a directory name.
///
/// Uppercases the first character and turns every later hyphen into a space:
/// `getting-started` becomes `Getting started`.
#[must_use]
pub fn derive_category_name(dir_name: &str) -> String {
    let mut chars = dir_name.chars();
    let mut name = String::with_capacity(dir_name.len());
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
        name.extend(chars.map(|c| if c == '-' { ' ' } else { c }));
    }
    name
}
