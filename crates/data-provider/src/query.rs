//! Query string construction for list verbs.

use serde_json::{Map, Value};

use crate::relation::value_segment;
use crate::types::{GetListParams, GetManyReferenceParams};

/// Flatten a filter object into query pairs.
///
/// Nested objects become dotted keys (`{"a":{"b":1}}` → `a.b=1`), arrays
/// become repeated keys, and nulls are dropped. Array elements that are
/// themselves objects are sent as JSON text.
pub fn flatten_filter(filter: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in filter {
        push_value(&mut pairs, key.clone(), value);
    }
    pairs
}

fn push_value(pairs: &mut Vec<(String, String)>, path: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, nested) in map {
                push_value(pairs, format!("{}.{}", path, key), nested);
            }
        }
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::Null => {}
                    Value::Object(_) | Value::Array(_) => {
                        pairs.push((path.clone(), item.to_string()));
                    }
                    scalar => pairs.push((path.clone(), value_segment(scalar))),
                }
            }
        }
        scalar => pairs.push((path, value_segment(scalar))),
    }
}

/// Query pairs for `getList`: filters, then `sort`, `page` (zero-based) and
/// `size`.
pub fn list_query(params: &GetListParams) -> Vec<(String, String)> {
    let mut pairs = flatten_filter(&params.filter);
    if let Some(sort) = &params.sort {
        pairs.push(("sort".to_string(), sort.to_query_value()));
    }
    if let Some(pagination) = &params.pagination {
        pairs.push(("page".to_string(), pagination.backend_page().to_string()));
        pairs.push(("size".to_string(), pagination.per_page.to_string()));
    }
    pairs
}

/// Query pairs for `getManyReference`: the list query plus `{target}={id}`.
pub fn reference_query(params: &GetManyReferenceParams) -> Vec<(String, String)> {
    let mut pairs = list_query(&params.list);
    pairs.retain(|(key, _)| key != &params.target);
    pairs.push((params.target.clone(), params.id.clone()));
    pairs
}
