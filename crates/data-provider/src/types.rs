//! Request and response types for the data provider verbs.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::relation::RelationRef;

// ─────────────────────────────────────────────────────────────────────────────
// Per-call metadata
// ─────────────────────────────────────────────────────────────────────────────

/// Per-call options carried alongside the verb parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMeta {
    /// Realm the resource lives under. Also accepted as `root`.
    #[serde(default, alias = "root")]
    pub realm_id: Option<String>,
    /// Relation fields to collapse to bare ids on read.
    #[serde(default)]
    pub flatten: Vec<String>,
    /// Create through the YAML import endpoint.
    #[serde(default)]
    pub import: bool,
    /// Ask the import endpoint to reset ids.
    #[serde(default)]
    pub reset_id: bool,
}

impl RequestMeta {
    pub fn realm(realm_id: impl Into<String>) -> Self {
        Self {
            realm_id: Some(realm_id.into()),
            ..Self::default()
        }
    }

    pub fn with_flatten<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flatten = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Route the create through the YAML import endpoint.
    pub fn as_import(mut self, reset_id: bool) -> Self {
        self.import = true;
        self.reset_id = reset_id;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Paging and sorting
// ─────────────────────────────────────────────────────────────────────────────

/// UI pagination. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// Zero-based page index as the backend expects it.
    pub fn backend_page(&self) -> u32 {
        self.page.saturating_sub(1)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            other => Err(format!("invalid sort order: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    /// `field,ORDER`
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.field, self.order)
    }
}

impl std::str::FromStr for Sort {
    type Err = String;

    /// Parses `field` or `field,ASC|DESC`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, order) = match s.split_once(',') {
            Some((field, order)) => (field, order.trim().parse()?),
            None => (s, SortOrder::Asc),
        };
        let field = field.trim();
        if field.is_empty() {
            return Err("sort field is empty".to_string());
        }
        Ok(Sort::new(field, order))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Verb parameters
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetListParams {
    pub pagination: Option<Pagination>,
    pub sort: Option<Sort>,
    pub filter: Map<String, Value>,
    pub meta: RequestMeta,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetOneParams {
    pub id: String,
    pub meta: RequestMeta,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetManyParams {
    pub ids: Vec<RelationRef>,
    pub meta: RequestMeta,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetManyReferenceParams {
    /// Field on the listed resource that points at the referenced record.
    pub target: String,
    /// Id of the referenced record.
    pub id: String,
    pub list: GetListParams,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateParams {
    /// JSON record, or the YAML document when `meta.import` is set.
    pub data: Value,
    pub meta: RequestMeta,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateParams {
    pub id: String,
    pub data: Value,
    pub previous_data: Option<Value>,
    pub meta: RequestMeta,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateManyParams {
    pub ids: Vec<String>,
    pub data: Value,
    pub meta: RequestMeta,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteParams {
    pub id: String,
    pub previous_data: Option<Value>,
    pub meta: RequestMeta,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteManyParams {
    pub ids: Vec<String>,
    pub meta: RequestMeta,
}

/// Arbitrary backend call relative to the console base URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvokeParams {
    pub path: String,
    /// Defaults to POST when a body is present, GET otherwise.
    pub method: Option<Method>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl InvokeParams {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            path: path.into(),
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn effective_method(&self) -> Method {
        match (&self.method, &self.body) {
            (Some(method), _) => method.clone(),
            (None, Some(_)) => Method::POST,
            (None, None) => Method::GET,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Verb results
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult {
    pub data: Vec<Value>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordResult {
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManyResult {
    pub data: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdsResult {
    pub data: Vec<String>,
}
