//! Data provider for the AAC admin and developer consoles.
//!
//! The provider maps the generic verbs used by console views (list, show,
//! edit, create, delete and their batch variants) onto the backend's
//! realm-scoped REST API, normalizes list envelopes and collapses relation
//! fields to ids for form binding.

pub mod config;
pub mod console;
pub mod envelope;
pub mod error;
pub mod fetch;
pub mod provider;
pub mod query;
pub mod relation;
pub mod resources;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use config::{ConsoleConfig, ConsoleLinks, DEFAULT_API_URL};
pub use console::ConsoleKind;
pub use envelope::ListEnvelope;
pub use error::{ConsoleError, ErrorClass, Result};
pub use fetch::{FetchBody, FetchOptions, FetchResponse, HttpFetch};
pub use provider::{ConsoleDataProvider, DataProvider};
pub use relation::{flatten_fields, RelationRef};
pub use resources::{ResourceCapabilities, ResourceTable, MY_REALMS};
pub use types::*;
