//! Relation references and field flattening.
//!
//! To-many relations come back from the backend either as full records
//! (`[{ "id": "r1", "name": "..." }]`) or as bare ids (`["r1"]`). Edit forms
//! bind them to multi-selects, which want bare ids, so declared fields are
//! collapsed on read. Writes are forwarded untouched: re-inflating ids into
//! records is the caller's job.

use serde_json::{Map, Value};

/// A relation value decoded once at the API boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum RelationRef {
    /// A record carrying an `id` property.
    Expanded(Map<String, Value>),
    /// Anything else: a bare id, or a value without an `id` kept as-is.
    Bare(Value),
}

impl RelationRef {
    pub fn decode(value: Value) -> Self {
        match value {
            Value::Object(map) if map.contains_key("id") => RelationRef::Expanded(map),
            other => RelationRef::Bare(other),
        }
    }

    /// Collapse to the bare id.
    pub fn into_id(self) -> Value {
        match self {
            RelationRef::Expanded(mut map) => map.remove("id").unwrap_or(Value::Null),
            RelationRef::Bare(value) => value,
        }
    }

    /// The id rendered as a URL path segment (unencoded).
    pub fn id_segment(&self) -> String {
        match self {
            RelationRef::Expanded(map) => map.get("id").map(value_segment).unwrap_or_default(),
            RelationRef::Bare(value) => value_segment(value),
        }
    }
}

impl From<Value> for RelationRef {
    fn from(value: Value) -> Self {
        RelationRef::decode(value)
    }
}

impl From<&str> for RelationRef {
    fn from(id: &str) -> Self {
        RelationRef::Bare(Value::String(id.to_string()))
    }
}

impl From<String> for RelationRef {
    fn from(id: String) -> Self {
        RelationRef::Bare(Value::String(id))
    }
}

/// Render a scalar JSON value as it would appear in a path or query string.
pub fn value_segment(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Collapse every declared relation field of `record` to bare ids.
///
/// Arrays have each element collapsed; a single object with an `id` is
/// replaced by that id. Other values, and fields not present, are left
/// alone. Applying it twice gives the same result as applying it once.
pub fn flatten_fields(record: &mut Value, fields: &[String]) {
    let Value::Object(map) = record else {
        return;
    };

    for field in fields {
        let Some(value) = map.get_mut(field) else {
            continue;
        };
        if let Value::Array(items) = value {
            for item in items.iter_mut() {
                *item = RelationRef::decode(item.take()).into_id();
            }
        } else if value.get("id").is_some() {
            *value = RelationRef::decode(value.take()).into_id();
        }
    }
}
