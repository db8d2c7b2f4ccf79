//! Endpoint source scoped to one collection, plus unscoped endpoint access
//! for the detail view.

use super::{lock, Page, PagedCrudSource};
use crate::domain::error::{ReqError, Result};
use crate::domain::validation::{validate_id, validate_name};
use crate::domain::Endpoint;
use crate::storage::{EndpointPatch, NewEndpoint, SharedStorage};

const KIND: &str = "endpoint";

/// [`PagedCrudSource`] over the endpoints of one collection.
///
/// New endpoints are created as `GET` with no URL; the detail view fills in
/// the rest.
#[derive(Clone)]
pub struct EndpointSource {
    storage: SharedStorage,
    collection_id: i64,
}

impl EndpointSource {
    #[must_use]
    pub const fn new(storage: SharedStorage, collection_id: i64) -> Self {
        Self {
            storage,
            collection_id,
        }
    }

    /// Collection this source is scoped to.
    #[must_use]
    pub const fn collection_id(&self) -> i64 {
        self.collection_id
    }
}

impl PagedCrudSource for EndpointSource {
    type Entity = Endpoint;

    fn list_page(&self, limit: usize, offset: usize) -> Result<Page<Endpoint>> {
        let (records, total) =
            lock(&self.storage)?.list_endpoints(self.collection_id, limit, offset)?;
        Ok(Page {
            items: records.into_iter().map(Endpoint::from).collect(),
            total,
        })
    }

    fn create(&self, name: &str) -> Result<Endpoint> {
        let name = validate_name(name)?;
        let record = lock(&self.storage)?
            .create_endpoint(NewEndpoint::named(self.collection_id, name))?
            .ok_or(ReqError::NotFound {
                kind: "collection",
                id: self.collection_id,
            })?;
        tracing::info!(endpoint_id = record.id, collection_id = self.collection_id, "endpoint created");
        Ok(record.into())
    }

    fn read(&self, id: i64) -> Result<Endpoint> {
        read_endpoint(&self.storage, id)
    }

    fn update(&self, id: i64, name: &str) -> Result<Endpoint> {
        let name = validate_name(name)?;
        patch_endpoint(
            &self.storage,
            id,
            EndpointPatch {
                name: Some(name),
                ..EndpointPatch::default()
            },
        )
    }

    fn delete(&self, id: i64) -> Result<()> {
        let id = validate_id(id)?;
        if lock(&self.storage)?.delete_endpoint(id)? {
            tracing::info!(endpoint_id = id, "endpoint deleted");
            Ok(())
        } else {
            Err(ReqError::NotFound { kind: KIND, id })
        }
    }
}

/// Loads an endpoint regardless of its collection.
///
/// # Errors
///
/// [`ReqError::NotFound`] if the id does not exist.
pub fn read_endpoint(storage: &SharedStorage, id: i64) -> Result<Endpoint> {
    let id = validate_id(id)?;
    lock(storage)?
        .get_endpoint(id)?
        .map(Endpoint::from)
        .ok_or(ReqError::NotFound { kind: KIND, id })
}

/// Applies a partial update to an endpoint.
///
/// # Errors
///
/// [`ReqError::NotFound`] if the id does not exist.
pub fn patch_endpoint(storage: &SharedStorage, id: i64, patch: EndpointPatch) -> Result<Endpoint> {
    let id = validate_id(id)?;
    lock(storage)?
        .update_endpoint(id, patch)?
        .map(Endpoint::from)
        .ok_or(ReqError::NotFound { kind: KIND, id })
}
