//! Storage backend abstraction.
//!
//! This module defines the [`Storage`] trait over the persistence backend. The
//! trait is deliberately record-level: validation and the `NotFound` mapping
//! live one layer up in [`crate::source`], so backends only report whether a
//! row existed.

use crate::domain::error::Result;
use crate::storage::models::{CollectionRecord, EndpointPatch, EndpointRecord, NewEndpoint};

/// Abstraction over persistent storage backends.
///
/// Listing methods return the page of records together with the total number
/// of matching records. Records are ordered by id, which is creation order.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes
///
/// # Errors
///
/// Every method returns an error only for backend failures (I/O, parse,
/// serialization). Missing rows are reported through `Option`/`bool`.
pub trait Storage: Send {
    /// Inserts a collection with an already validated name.
    fn create_collection(&mut self, name: &str) -> Result<CollectionRecord>;

    /// Looks up a collection by id.
    fn get_collection(&self, id: i64) -> Result<Option<CollectionRecord>>;

    /// Renames a collection. Returns `None` if it does not exist.
    fn rename_collection(&mut self, id: i64, name: &str) -> Result<Option<CollectionRecord>>;

    /// Deletes a collection and all of its endpoints. Returns whether it existed.
    fn delete_collection(&mut self, id: i64) -> Result<bool>;

    /// Returns up to `limit` collections starting at `offset`, plus the total count.
    ///
    /// An `offset` past the end yields an empty page, not an error.
    fn list_collections(&self, limit: usize, offset: usize) -> Result<(Vec<CollectionRecord>, u64)>;

    /// Inserts an endpoint. Returns `None` if the parent collection does not exist.
    fn create_endpoint(&mut self, endpoint: NewEndpoint) -> Result<Option<EndpointRecord>>;

    /// Looks up an endpoint by id.
    fn get_endpoint(&self, id: i64) -> Result<Option<EndpointRecord>>;

    /// Applies a partial update. Returns `None` if the endpoint does not exist.
    fn update_endpoint(&mut self, id: i64, patch: EndpointPatch) -> Result<Option<EndpointRecord>>;

    /// Deletes an endpoint. Returns whether it existed.
    fn delete_endpoint(&mut self, id: i64) -> Result<bool>;

    /// Returns a page of a collection's endpoints, plus the collection's endpoint count.
    fn list_endpoints(
        &self,
        collection_id: i64,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<EndpointRecord>, u64)>;

    /// Returns `true` when the store holds no collections.
    fn is_empty(&self) -> Result<bool> {
        Ok(self.list_collections(1, 0)?.1 == 0)
    }
}
