//! List-shaped response bodies
//!
//! List endpoints answer either with a bare JSON array or with an object that
//! wraps the array under a named field (`{"schedules": [...]}`). The shape is
//! resolved once here; callers only see the ordered items.

use serde_json::{Map, Value};

/// A parsed list response.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    /// `[...]`
    Bare(Vec<Value>),
    /// `{"<field>": [...]}`
    Wrapped { field: String, items: Vec<Value> },
}

impl Listing {
    /// Parse a response body.
    ///
    /// With `wrapper = None` only a bare array is accepted. With
    /// `wrapper = Some(field)` an object is also accepted; a missing field
    /// reads as an empty list, a non-array field as no listing at all.
    #[must_use]
    pub fn parse(body: &str, wrapper: Option<&str>) -> Option<Self> {
        let value: Value = serde_json::from_str(body).ok()?;
        match value {
            Value::Array(items) => Some(Self::Bare(items)),
            Value::Object(mut obj) => {
                let field = wrapper?;
                match obj.remove(field) {
                    None => Some(Self::Wrapped {
                        field: field.to_string(),
                        items: Vec::new(),
                    }),
                    Some(Value::Array(items)) => Some(Self::Wrapped {
                        field: field.to_string(),
                        items,
                    }),
                    Some(_) => None,
                }
            }
            _ => None,
        }
    }

    /// The ordered items, whatever the wrapper.
    #[must_use]
    pub fn items(&self) -> &[Value] {
        match self {
            Self::Bare(items) | Self::Wrapped { items, .. } => items,
        }
    }

    /// The first item, if it is an object.
    #[must_use]
    pub fn first_record(&self) -> Option<&Map<String, Value>> {
        self.items().first().and_then(Value::as_object)
    }
}

/// Coerce a scalar to its identifier string. `null` is absent.
///
/// Strings are taken verbatim; numbers, booleans and nested values use their
/// JSON text.
#[must_use]
pub fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// First present, non-null field among `candidates`, coerced to a string.
#[must_use]
pub fn first_field(record: &Map<String, Value>, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|key| record.get(*key))
        .find_map(id_string)
}
