//! Collection source backed by the shared store.

use super::{lock, Page, PagedCrudSource};
use crate::domain::error::{ReqError, Result};
use crate::domain::validation::{validate_id, validate_name};
use crate::domain::Collection;
use crate::storage::SharedStorage;

const KIND: &str = "collection";

/// [`PagedCrudSource`] over all collections.
#[derive(Clone)]
pub struct CollectionSource {
    storage: SharedStorage,
}

impl CollectionSource {
    #[must_use]
    pub const fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }
}

impl PagedCrudSource for CollectionSource {
    type Entity = Collection;

    fn list_page(&self, limit: usize, offset: usize) -> Result<Page<Collection>> {
        let (records, total) = lock(&self.storage)?.list_collections(limit, offset)?;
        Ok(Page {
            items: records.into_iter().map(Collection::from).collect(),
            total,
        })
    }

    fn create(&self, name: &str) -> Result<Collection> {
        let name = validate_name(name)?;
        let record = lock(&self.storage)?.create_collection(&name)?;
        tracing::info!(collection_id = record.id, name = %record.name, "collection created");
        Ok(record.into())
    }

    fn read(&self, id: i64) -> Result<Collection> {
        let id = validate_id(id)?;
        lock(&self.storage)?
            .get_collection(id)?
            .map(Collection::from)
            .ok_or(ReqError::NotFound { kind: KIND, id })
    }

    fn update(&self, id: i64, name: &str) -> Result<Collection> {
        let id = validate_id(id)?;
        let name = validate_name(name)?;
        lock(&self.storage)?
            .rename_collection(id, &name)?
            .map(Collection::from)
            .ok_or(ReqError::NotFound { kind: KIND, id })
    }

    fn delete(&self, id: i64) -> Result<()> {
        let id = validate_id(id)?;
        if lock(&self.storage)?.delete_collection(id)? {
            tracing::info!(collection_id = id, "collection deleted");
            Ok(())
        } else {
            Err(ReqError::NotFound { kind: KIND, id })
        }
    }
}
