//! Data provider for the console API.
//!
//! Translates the generic CRUD verbs used by console views into
//! realm-scoped REST calls:
//!
//! - `GET    {resource}[/{realm}]?{filters}&sort=f,ORDER&page=p-1&size=n`
//! - `GET    {resource}[/{realm}]/{id}`
//! - `POST   {resource}[/{realm}]`
//! - `PUT    {resource}[/{realm}]/{id}`
//! - `DELETE {resource}[/{realm}]/{id}`
//!
//! There are no batch endpoints; the `*Many` verbs fan out one request per
//! id and run them concurrently.

use async_trait::async_trait;
use futures::future::try_join_all;
use log::debug;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

use crate::config::ConsoleConfig;
use crate::console::ConsoleKind;
use crate::envelope::ListEnvelope;
use crate::error::{ConsoleError, Result};
use crate::fetch::{FetchBody, FetchOptions, HttpFetch};
use crate::query;
use crate::relation::{flatten_fields, value_segment};
use crate::resources::ResourceTable;
use crate::types::*;

/// CRUD contract plus the custom console verbs.
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn get_list(&self, resource: &str, params: GetListParams) -> Result<ListResult>;

    async fn get_one(&self, resource: &str, params: GetOneParams) -> Result<RecordResult>;

    async fn get_many(&self, resource: &str, params: GetManyParams) -> Result<ManyResult>;

    async fn get_many_reference(
        &self,
        resource: &str,
        params: GetManyReferenceParams,
    ) -> Result<ListResult>;

    async fn create(&self, resource: &str, params: CreateParams) -> Result<RecordResult>;

    async fn update(&self, resource: &str, params: UpdateParams) -> Result<RecordResult>;

    async fn update_many(&self, resource: &str, params: UpdateManyParams) -> Result<IdsResult>;

    async fn delete(&self, resource: &str, params: DeleteParams) -> Result<RecordResult>;

    async fn delete_many(&self, resource: &str, params: DeleteManyParams) -> Result<IdsResult>;

    /// Arbitrary backend call for operations outside CRUD.
    async fn invoke(&self, params: InvokeParams) -> Result<Value>;

    /// Global application properties. Admin console only.
    async fn app_props(&self) -> Result<Value>;

    /// Authorities granted to the current principal. Developer console only.
    async fn my_authorities(&self) -> Result<Value>;
}

/// HTTP implementation of [`DataProvider`] for one console.
#[derive(Debug, Clone)]
pub struct ConsoleDataProvider {
    http: HttpFetch,
    base_url: String,
    kind: ConsoleKind,
    resources: ResourceTable,
}

impl ConsoleDataProvider {
    /// Create a provider for `kind` against the configured API.
    pub fn new(config: &ConsoleConfig, kind: ConsoleKind) -> Result<Self> {
        let http = HttpFetch::new(
            &config.api_url,
            config.session_cookie.as_deref(),
            config.timeout,
        )?;
        Ok(Self {
            http,
            base_url: config.console_base_url(kind),
            kind,
            resources: ResourceTable::default(),
        })
    }

    /// Replace the capability table.
    pub fn with_resources(mut self, resources: ResourceTable) -> Self {
        self.resources = resources;
        self
    }

    pub fn kind(&self) -> ConsoleKind {
        self.kind
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn resources(&self) -> &ResourceTable {
        &self.resources
    }

    // ─────────────────────────────────────────────────────────────────────────
    // URL construction
    // ─────────────────────────────────────────────────────────────────────────

    /// `{base}/{resource}[/{realm}]` for list calls. The realm segment is only
    /// added when the resource is scoped and a realm is known.
    fn collection_url(&self, resource: &str, meta: &RequestMeta) -> String {
        let mut url = format!("{}/{}", self.base_url, resource);
        if self.resources.is_realm_scoped(resource) {
            if let Some(realm) = meta.realm_id.as_deref().filter(|r| !r.is_empty()) {
                url.push('/');
                url.push_str(&urlencoding::encode(realm));
            }
        }
        url
    }

    /// `{base}/{resource}[/{realm}]` for calls that address records. A scoped
    /// resource without a realm is rejected.
    fn scoped_url(&self, resource: &str, meta: &RequestMeta) -> Result<String> {
        if !self.resources.is_realm_scoped(resource) {
            return Ok(format!("{}/{}", self.base_url, resource));
        }
        let realm = meta
            .realm_id
            .as_deref()
            .filter(|r| !r.is_empty())
            .ok_or_else(|| ConsoleError::missing_realm(resource))?;
        Ok(format!(
            "{}/{}/{}",
            self.base_url,
            resource,
            urlencoding::encode(realm)
        ))
    }

    fn record_url(&self, resource: &str, meta: &RequestMeta, id: &str) -> Result<String> {
        if id.is_empty() {
            return Err(ConsoleError::invalid_request(format!(
                "missing record id for '{}'",
                resource
            )));
        }
        Ok(format!(
            "{}/{}",
            self.scoped_url(resource, meta)?,
            urlencoding::encode(id)
        ))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Shared request helpers
    // ─────────────────────────────────────────────────────────────────────────

    async fn fetch_list(
        &self,
        resource: &str,
        url: &str,
        query: Vec<(String, String)>,
    ) -> Result<ListResult> {
        let response = self
            .http
            .fetch(url, FetchOptions::get().with_query(query))
            .await?;
        ListEnvelope::decode(resource, response.json).map(ListEnvelope::into_result)
    }

    /// GET one record, requiring a 200, and flatten the declared fields.
    async fn fetch_record(&self, url: String, flatten: &[String]) -> Result<Value> {
        let response = self.http.fetch(&url, FetchOptions::get()).await?;
        if response.status != StatusCode::OK {
            return Err(ConsoleError::api(
                response.status.as_u16(),
                format!("Invalid response status {}", response.status.as_u16()),
            ));
        }
        let mut record = response.json;
        flatten_fields(&mut record, flatten);
        Ok(record)
    }

    /// Send a write and return the id the backend echoed, or `fallback`.
    async fn write_returning_id(
        &self,
        url: String,
        options: FetchOptions,
        fallback: String,
    ) -> Result<String> {
        let response = self.http.fetch(&url, options).await?;
        Ok(response
            .json
            .get("id")
            .map(value_segment)
            .filter(|id| !id.is_empty())
            .unwrap_or(fallback))
    }

    fn write_body(data: Value) -> FetchBody {
        match data {
            // Callers may hand over a record they already serialized.
            Value::String(text) => FetchBody::RawJson(text),
            other => FetchBody::Json(other),
        }
    }

    async fn import(&self, resource: &str, params: CreateParams) -> Result<RecordResult> {
        let yaml = match params.data {
            Value::String(yaml) => yaml,
            Value::Object(mut map) => match map.remove("yaml") {
                Some(Value::String(yaml)) => yaml,
                _ => {
                    return Err(ConsoleError::invalid_request(
                        "import requires a 'yaml' string field",
                    ))
                }
            },
            _ => {
                return Err(ConsoleError::invalid_request(
                    "import requires a YAML document",
                ))
            }
        };

        let url = self.scoped_url(resource, &params.meta)?;
        let mut query = Vec::new();
        if params.meta.reset_id {
            query.push(("reset".to_string(), "true".to_string()));
        }
        debug!("Importing {} via {}", resource, url);

        let form = reqwest::multipart::Form::new().text("yaml", yaml);
        let response = self
            .http
            .fetch(
                &url,
                FetchOptions::new(Method::PUT)
                    .with_query(query)
                    .with_body(FetchBody::Multipart(form)),
            )
            .await?;
        Ok(RecordResult {
            data: response.json,
        })
    }

    async fn metadata(&self, expected: ConsoleKind) -> Result<Value> {
        if self.kind != expected {
            return Err(ConsoleError::unsupported(expected.metadata_verb(), self.kind));
        }
        let url = format!("{}/{}", self.base_url, self.kind.metadata_path());
        let response = self.http.fetch(&url, FetchOptions::get()).await?;
        Ok(response.json)
    }
}

#[async_trait]
impl DataProvider for ConsoleDataProvider {
    async fn get_list(&self, resource: &str, params: GetListParams) -> Result<ListResult> {
        let url = self.collection_url(resource, &params.meta);
        self.fetch_list(resource, &url, query::list_query(&params))
            .await
    }

    async fn get_one(&self, resource: &str, params: GetOneParams) -> Result<RecordResult> {
        let url = self.record_url(resource, &params.meta, &params.id)?;
        let data = self.fetch_record(url, &params.meta.flatten).await?;
        Ok(RecordResult { data })
    }

    async fn get_many(&self, resource: &str, params: GetManyParams) -> Result<ManyResult> {
        let urls = params
            .ids
            .iter()
            .map(|id| self.record_url(resource, &params.meta, &id.id_segment()))
            .collect::<Result<Vec<_>>>()?;
        debug!("Fetching {} {} records", urls.len(), resource);

        let flatten = &params.meta.flatten;
        let data = try_join_all(urls.into_iter().map(|url| self.fetch_record(url, flatten))).await?;
        Ok(ManyResult { data })
    }

    async fn get_many_reference(
        &self,
        resource: &str,
        params: GetManyReferenceParams,
    ) -> Result<ListResult> {
        let url = self.collection_url(resource, &params.list.meta);
        self.fetch_list(resource, &url, query::reference_query(&params))
            .await
    }

    async fn create(&self, resource: &str, params: CreateParams) -> Result<RecordResult> {
        if params.meta.import {
            return self.import(resource, params).await;
        }

        let url = self.scoped_url(resource, &params.meta)?;
        let response = self
            .http
            .fetch(
                &url,
                FetchOptions::new(Method::POST).with_body(Self::write_body(params.data.clone())),
            )
            .await?;

        let data = match params.data {
            Value::Object(mut record) => {
                if let Some(id) = response.json.get("id") {
                    record.insert("id".to_string(), id.clone());
                }
                Value::Object(record)
            }
            _ => response.json,
        };
        Ok(RecordResult { data })
    }

    async fn update(&self, resource: &str, params: UpdateParams) -> Result<RecordResult> {
        let url = self.record_url(resource, &params.meta, &params.id)?;
        let response = self
            .http
            .fetch(
                &url,
                FetchOptions::new(Method::PUT).with_body(Self::write_body(params.data)),
            )
            .await?;

        let mut data = response.json;
        flatten_fields(&mut data, &params.meta.flatten);
        Ok(RecordResult { data })
    }

    async fn update_many(&self, resource: &str, params: UpdateManyParams) -> Result<IdsResult> {
        let targets = params
            .ids
            .iter()
            .map(|id| -> Result<(String, String)> {
                Ok((self.record_url(resource, &params.meta, id)?, id.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        let data = try_join_all(targets.into_iter().map(|(url, id)| {
            let options =
                FetchOptions::new(Method::PUT).with_body(Self::write_body(params.data.clone()));
            self.write_returning_id(url, options, id)
        }))
        .await?;
        Ok(IdsResult { data })
    }

    async fn delete(&self, resource: &str, params: DeleteParams) -> Result<RecordResult> {
        let url = self.record_url(resource, &params.meta, &params.id)?;
        let response = self
            .http
            .fetch(&url, FetchOptions::new(Method::DELETE))
            .await?;

        let data = match response.json {
            Value::Null => params
                .previous_data
                .unwrap_or_else(|| json!({ "id": params.id })),
            json => json,
        };
        Ok(RecordResult { data })
    }

    async fn delete_many(&self, resource: &str, params: DeleteManyParams) -> Result<IdsResult> {
        let targets = params
            .ids
            .iter()
            .map(|id| -> Result<(String, String)> {
                Ok((self.record_url(resource, &params.meta, id)?, id.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        let data = try_join_all(targets.into_iter().map(|(url, id)| {
            self.write_returning_id(url, FetchOptions::new(Method::DELETE), id)
        }))
        .await?;
        Ok(IdsResult { data })
    }

    async fn invoke(&self, params: InvokeParams) -> Result<Value> {
        let method = params.effective_method();
        let url = format!("{}/{}", self.base_url, params.path.trim_start_matches('/'));
        let mut options = FetchOptions::new(method).with_query(params.query);
        if let Some(body) = params.body {
            options = options.with_json(body);
        }
        let response = self.http.fetch(&url, options).await?;
        Ok(response.json)
    }

    async fn app_props(&self) -> Result<Value> {
        self.metadata(ConsoleKind::Admin).await
    }

    async fn my_authorities(&self) -> Result<Value> {
        self.metadata(ConsoleKind::Developer).await
    }
}
