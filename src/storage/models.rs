//! Storage record models for the persistence layer.
//!
//! Records are the on-disk shape of collections and endpoints. They are kept
//! separate from the domain models so the file layout can evolve without
//! touching the views.

use crate::domain::{Collection, Endpoint, HttpMethod};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A persisted collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRecord {
    /// Identifier assigned by the store.
    pub id: i64,

    /// Validated display name.
    pub name: String,

    /// Unix timestamp of creation.
    pub created_at: i64,

    /// Unix timestamp of the last change to the collection or one of its endpoints.
    pub updated_at: i64,
}

impl From<CollectionRecord> for Collection {
    fn from(record: CollectionRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// A persisted endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointRecord {
    pub id: i64,
    pub collection_id: i64,
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub query_params: BTreeMap<String, String>,
    #[serde(default)]
    pub request_body: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<EndpointRecord> for Endpoint {
    fn from(record: EndpointRecord) -> Self {
        Self {
            id: record.id,
            collection_id: record.collection_id,
            name: record.name,
            method: record.method,
            url: record.url,
            headers: record.headers,
            query_params: record.query_params,
            request_body: record.request_body,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Fields required to insert an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEndpoint {
    pub collection_id: i64,
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub query_params: BTreeMap<String, String>,
    pub request_body: String,
}

impl NewEndpoint {
    /// A `GET` endpoint with no URL, headers or body.
    pub fn named(collection_id: i64, name: impl Into<String>) -> Self {
        Self {
            collection_id,
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Partial update of an endpoint. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointPatch {
    pub name: Option<String>,
    pub method: Option<HttpMethod>,
    pub url: Option<String>,
    pub headers: Option<BTreeMap<String, String>>,
    pub query_params: Option<BTreeMap<String, String>>,
    pub request_body: Option<String>,
}

impl EndpointPatch {
    /// Applies the patch to a record in place.
    pub fn apply(self, record: &mut EndpointRecord) {
        self.write(EndpointFields {
            name: &mut record.name,
            method: &mut record.method,
            url: &mut record.url,
            headers: &mut record.headers,
            query_params: &mut record.query_params,
            request_body: &mut record.request_body,
        });
    }

    /// Applies the patch to a loaded endpoint, ahead of the store.
    pub fn apply_to_endpoint(self, endpoint: &mut Endpoint) {
        self.write(EndpointFields {
            name: &mut endpoint.name,
            method: &mut endpoint.method,
            url: &mut endpoint.url,
            headers: &mut endpoint.headers,
            query_params: &mut endpoint.query_params,
            request_body: &mut endpoint.request_body,
        });
    }

    /// Folds a later patch into this one; fields set in `later` win.
    pub fn merge(&mut self, later: Self) {
        if later.name.is_some() {
            self.name = later.name;
        }
        if later.method.is_some() {
            self.method = later.method;
        }
        if later.url.is_some() {
            self.url = later.url;
        }
        if later.headers.is_some() {
            self.headers = later.headers;
        }
        if later.query_params.is_some() {
            self.query_params = later.query_params;
        }
        if later.request_body.is_some() {
            self.request_body = later.request_body;
        }
    }

    fn write(self, fields: EndpointFields<'_>) {
        if let Some(name) = self.name {
            *fields.name = name;
        }
        if let Some(method) = self.method {
            *fields.method = method;
        }
        if let Some(url) = self.url {
            *fields.url = url;
        }
        if let Some(headers) = self.headers {
            *fields.headers = headers;
        }
        if let Some(query_params) = self.query_params {
            *fields.query_params = query_params;
        }
        if let Some(body) = self.request_body {
            *fields.request_body = body;
        }
    }
}

/// Editable fields of either an [`EndpointRecord`] or an [`Endpoint`].
struct EndpointFields<'a> {
    name: &'a mut String,
    method: &'a mut HttpMethod,
    url: &'a mut String,
    headers: &'a mut BTreeMap<String, String>,
    query_params: &'a mut BTreeMap<String, String>,
    request_body: &'a mut String,
}
