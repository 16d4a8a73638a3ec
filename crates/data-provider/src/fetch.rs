//! HTTP fetch wrapper.
//!
//! Every request goes out with the session's cookies attached, the way a
//! browser sends `credentials: include`. When the caller supplies no headers
//! the wrapper asks for JSON.

use log::debug;
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{ConsoleError, Result};

const MAX_LOG_BODY_CHARS: usize = 512;

/// Request body variants.
pub enum FetchBody {
    Empty,
    /// Serialized as JSON.
    Json(Value),
    /// Already-serialized JSON text, sent as-is.
    RawJson(String),
    Multipart(reqwest::multipart::Form),
}

impl fmt::Debug for FetchBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchBody::Empty => f.write_str("Empty"),
            FetchBody::Json(value) => f.debug_tuple("Json").field(value).finish(),
            FetchBody::RawJson(text) => f.debug_tuple("RawJson").field(text).finish(),
            FetchBody::Multipart(_) => f.write_str("Multipart(..)"),
        }
    }
}

#[derive(Debug)]
pub struct FetchOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: FetchBody,
}

impl FetchOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: FetchBody::Empty,
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: FetchBody) -> Self {
        self.body = body;
        self
    }

    pub fn with_json(self, value: Value) -> Self {
        self.with_body(FetchBody::Json(value))
    }
}

/// Parsed response. `json` is `null` for an empty body.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
    pub json: Value,
}

/// Error body as produced by the backend.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpFetch {
    client: reqwest::Client,
}

impl HttpFetch {
    /// Create a fetch wrapper for an API rooted at `api_url`.
    ///
    /// `session_cookie` takes a `Cookie` header value (`a=1; b=2`); each pair
    /// is stored in the jar for the API origin. No timeout is applied unless
    /// one is given.
    pub fn new(
        api_url: &str,
        session_cookie: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        if let Some(cookie) = session_cookie {
            let origin = Url::parse(api_url)
                .map_err(|e| ConsoleError::config(format!("invalid API URL {}: {}", api_url, e)))?;
            for pair in cookie.split(';').map(str::trim).filter(|p| !p.is_empty()) {
                jar.add_cookie_str(pair, &origin);
            }
        }

        let mut builder = reqwest::Client::builder().cookie_provider(jar);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConsoleError::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn log_response(status: StatusCode, body: &str) {
        if status.is_success() {
            debug!("API response status: {}", status);
            return;
        }

        let mut preview = body.chars().take(MAX_LOG_BODY_CHARS).collect::<String>();
        if body.chars().count() > MAX_LOG_BODY_CHARS {
            preview.push_str("...");
        }
        debug!("API response error ({}): {}", status, preview);
    }

    /// Issue a request and parse the JSON response.
    pub async fn fetch(&self, url: &str, options: FetchOptions) -> Result<FetchResponse> {
        let FetchOptions {
            method,
            mut headers,
            query,
            body,
        } = options;

        if headers.is_empty() {
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        }

        debug!("{} {} {:?}", method, url, query);

        let mut request = self.client.request(method, url).headers(headers);
        if !query.is_empty() {
            request = request.query(&query);
        }
        request = match body {
            FetchBody::Empty => request,
            FetchBody::Json(value) => request.json(&value),
            FetchBody::RawJson(text) => request
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(text),
            FetchBody::Multipart(form) => request.multipart(form),
        };

        let response = request.send().await?;
        Self::parse_response(response).await
    }

    async fn parse_response(response: reqwest::Response) -> Result<FetchResponse> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        Self::log_response(status, &body);

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|error| error.message.or(error.error))
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| {
                    if body.trim().is_empty() {
                        status.canonical_reason().unwrap_or("request failed").to_string()
                    } else {
                        format!("Request failed: {}", body)
                    }
                });
            return Err(ConsoleError::api(status.as_u16(), message));
        }

        let json = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body).map_err(|e| {
                log::error!(
                    "Failed to deserialize response. Body: {}, Error: {}",
                    body,
                    e
                );
                e
            })?
        };

        Ok(FetchResponse {
            status,
            headers,
            body,
            json,
        })
    }
}
