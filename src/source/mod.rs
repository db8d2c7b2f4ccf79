//! Paged CRUD sources consumed by the list views.
//!
//! A [`PagedCrudSource`] is the contract a [`ResourceListView`] drives: one
//! resource type, paged listing with a total count, and single-item CRUD.
//! Sources validate input and translate missing rows into
//! [`ReqError::NotFound`], so views only ever see the three error classes.
//!
//! [`ResourceListView`]: crate::app::list::ResourceListView

pub mod collections;
pub mod endpoints;

pub use collections::CollectionSource;
pub use endpoints::EndpointSource;

use crate::domain::error::{ReqError, Result};
use crate::storage::{SharedStorage, Storage};
use std::sync::MutexGuard;

/// One page of entities plus the backend's total count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Paged list and single-item CRUD for one resource type.
///
/// Implementations are cheap to share (`Send + Sync`) because list views hand
/// them to worker jobs.
pub trait PagedCrudSource: Send + Sync + 'static {
    /// Domain entity this source produces.
    type Entity: Clone + Send + 'static;

    /// Returns up to `limit` entities starting at `offset`.
    ///
    /// An `offset` at or past the total yields an empty page with the correct
    /// total.
    fn list_page(&self, limit: usize, offset: usize) -> Result<Page<Self::Entity>>;

    /// Creates a new entity from a name.
    ///
    /// # Errors
    ///
    /// [`ReqError::InvalidInput`] for empty or too-long names.
    fn create(&self, name: &str) -> Result<Self::Entity>;

    /// Loads one entity.
    ///
    /// # Errors
    ///
    /// [`ReqError::NotFound`] if the id does not exist.
    fn read(&self, id: i64) -> Result<Self::Entity>;

    /// Renames an entity.
    ///
    /// # Errors
    ///
    /// [`ReqError::NotFound`] or [`ReqError::InvalidInput`].
    fn update(&self, id: i64, name: &str) -> Result<Self::Entity>;

    /// Deletes an entity.
    ///
    /// # Errors
    ///
    /// [`ReqError::NotFound`] if absent, including on a repeated delete.
    fn delete(&self, id: i64) -> Result<()>;
}

/// Locks the shared store, mapping a poisoned mutex to a storage error.
pub(crate) fn lock(storage: &SharedStorage) -> Result<MutexGuard<'_, Box<dyn Storage>>> {
    storage
        .lock()
        .map_err(|_| ReqError::Storage("storage lock poisoned".to_string()))
}
