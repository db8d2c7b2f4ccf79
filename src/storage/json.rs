//! JSON file-based storage backend.
//!
//! This module provides a simple, human-readable storage implementation using
//! JSON serialization. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes.
//!
//! # Performance Characteristics
//!
//! - **Read**: loads the entire file into memory once
//! - **Write**: serializes and writes the entire dataset after each mutation
//! - **Best for**: thousands of endpoints, interactive write rates

use crate::domain::error::{ReqError, Result};
use crate::domain::time;
use crate::storage::backend::Storage;
use crate::storage::models::{CollectionRecord, EndpointPatch, EndpointRecord, NewEndpoint};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const STORAGE_VERSION: u32 = 1;

/// JSON storage container format.
///
/// Records are keyed by id; `BTreeMap` iteration order is id order, which is
/// the listing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// Next id handed out to a new collection.
    #[serde(default = "first_id")]
    next_collection_id: i64,

    /// Next id handed out to a new endpoint.
    #[serde(default = "first_id")]
    next_endpoint_id: i64,

    #[serde(default)]
    collections: BTreeMap<i64, CollectionRecord>,

    #[serde(default)]
    endpoints: BTreeMap<i64, EndpointRecord>,
}

const fn first_id() -> i64 {
    1
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: STORAGE_VERSION,
            next_collection_id: first_id(),
            next_endpoint_id: first_id(),
            collections: BTreeMap::new(),
            endpoints: BTreeMap::new(),
        }
    }
}

/// JSON file storage backend.
///
/// Stores collections and endpoints in a JSON file with atomic writes. The
/// whole dataset lives in memory and is persisted after every mutation.
///
/// # Thread Safety
///
/// `Send` but not `Sync`; the worker pool shares it behind a mutex.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "next_collection_id": 2,
///   "next_endpoint_id": 2,
///   "collections": {
///     "1": { "id": 1, "name": "HTTPBin", "created_at": 1700000000, "updated_at": 1700000000 }
///   },
///   "endpoints": {
///     "1": {
///       "id": 1, "collection_id": 1, "name": "Get IP", "method": "GET",
///       "url": "https://httpbin.org/ip", "headers": {}, "query_params": {},
///       "request_body": "", "created_at": 1700000000, "updated_at": 1700000000
///     }
///   }
/// }
/// ```
pub struct JsonStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory data cache, loaded on creation. Always equal to the last
    /// successfully written file.
    data: StorageData,
}

impl JsonStorage {
    /// Creates or opens a JSON storage backend.
    ///
    /// If the file exists, loads existing data. Otherwise starts empty; the file
    /// is written on the first mutation. Parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty storage");
            StorageData::default()
        };

        tracing::debug!(
            collection_count = data.collections.len(),
            endpoint_count = data.endpoints.len(),
            "storage initialized"
        );

        Ok(Self { file_path, data })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| ReqError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version > STORAGE_VERSION {
            return Err(ReqError::Storage(format!(
                "storage version {} is newer than supported version {STORAGE_VERSION}",
                data.version
            )));
        }

        tracing::debug!(
            version = data.version,
            collections = data.collections.len(),
            endpoints = data.endpoints.len(),
            "loaded storage data"
        );

        Ok(data)
    }

    /// Writes `data` to disk using an atomic write.
    ///
    /// Writes to a temporary file first, then renames it over the target path.
    fn save_to_file(&self, data: &StorageData) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| ReqError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "storage saved");
        Ok(())
    }

    /// Applies `mutate` to a copy of the data and keeps the copy only once it
    /// is on disk. `None` from `mutate` means nothing matched; nothing is
    /// written then.
    fn commit<T>(&mut self, mutate: impl FnOnce(&mut StorageData) -> Option<T>) -> Result<Option<T>> {
        let mut next = self.data.clone();
        let Some(value) = mutate(&mut next) else {
            return Ok(None);
        };
        if let Err(e) = self.save_to_file(&next) {
            tracing::warn!(error = %e, "save failed, in-memory state left unchanged");
            return Err(e);
        }
        self.data = next;
        Ok(Some(value))
    }
}

impl StorageData {
    fn touch_collection(&mut self, collection_id: i64, now: i64) {
        if let Some(collection) = self.collections.get_mut(&collection_id) {
            collection.updated_at = now;
        }
    }
}

/// Slices `limit` items starting at `offset` out of an id-ordered iterator.
fn page_of<'a, T: Clone + 'a>(
    iter: impl Iterator<Item = &'a T>,
    limit: usize,
    offset: usize,
) -> Vec<T> {
    iter.skip(offset).take(limit).cloned().collect()
}

impl Storage for JsonStorage {
    fn create_collection(&mut self, name: &str) -> Result<CollectionRecord> {
        let _span = tracing::debug_span!("json_create_collection", name = %name).entered();

        let now = time::now();
        let id = self.data.next_collection_id;
        let record = CollectionRecord {
            id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        let inserted = record.clone();
        self.commit(|data| {
            data.next_collection_id = id.saturating_add(1);
            data.collections.insert(id, inserted);
            Some(())
        })?;

        tracing::debug!(collection_id = record.id, "collection created");
        Ok(record)
    }

    fn get_collection(&self, id: i64) -> Result<Option<CollectionRecord>> {
        Ok(self.data.collections.get(&id).cloned())
    }

    fn rename_collection(&mut self, id: i64, name: &str) -> Result<Option<CollectionRecord>> {
        let _span = tracing::debug_span!("json_rename_collection", id, name = %name).entered();

        let renamed = self.commit(|data| {
            let collection = data.collections.get_mut(&id)?;
            collection.name = name.to_string();
            collection.updated_at = time::now();
            Some(collection.clone())
        })?;
        if renamed.is_none() {
            tracing::debug!("collection not found");
        }
        Ok(renamed)
    }

    fn delete_collection(&mut self, id: i64) -> Result<bool> {
        let _span = tracing::debug_span!("json_delete_collection", id).entered();

        let removed = self.commit(|data| {
            data.collections.remove(&id)?;
            let before = data.endpoints.len();
            data.endpoints.retain(|_, e| e.collection_id != id);
            Some(before - data.endpoints.len())
        })?;
        match removed {
            Some(removed_endpoints) => {
                tracing::debug!(removed_endpoints, "collection deleted");
                Ok(true)
            }
            None => {
                tracing::debug!("collection not found");
                Ok(false)
            }
        }
    }

    fn list_collections(&self, limit: usize, offset: usize) -> Result<(Vec<CollectionRecord>, u64)> {
        let _span = tracing::debug_span!("json_list_collections", limit, offset).entered();

        let total = self.data.collections.len() as u64;
        let items = page_of(self.data.collections.values(), limit, offset);

        tracing::debug!(count = items.len(), total, "listed collections");
        Ok((items, total))
    }

    fn create_endpoint(&mut self, endpoint: NewEndpoint) -> Result<Option<EndpointRecord>> {
        let _span = tracing::debug_span!("json_create_endpoint",
            collection_id = endpoint.collection_id,
            name = %endpoint.name
        )
        .entered();

        let now = time::now();
        let created = self.commit(|data| {
            if !data.collections.contains_key(&endpoint.collection_id) {
                return None;
            }
            let id = data.next_endpoint_id;
            let record = EndpointRecord {
                id,
                collection_id: endpoint.collection_id,
                name: endpoint.name,
                method: endpoint.method,
                url: endpoint.url,
                headers: endpoint.headers,
                query_params: endpoint.query_params,
                request_body: endpoint.request_body,
                created_at: now,
                updated_at: now,
            };
            data.next_endpoint_id = id.saturating_add(1);
            data.endpoints.insert(id, record.clone());
            data.touch_collection(record.collection_id, now);
            Some(record)
        })?;

        match &created {
            Some(record) => tracing::debug!(endpoint_id = record.id, "endpoint created"),
            None => tracing::debug!("parent collection not found"),
        }
        Ok(created)
    }

    fn get_endpoint(&self, id: i64) -> Result<Option<EndpointRecord>> {
        Ok(self.data.endpoints.get(&id).cloned())
    }

    fn update_endpoint(&mut self, id: i64, patch: EndpointPatch) -> Result<Option<EndpointRecord>> {
        let _span = tracing::debug_span!("json_update_endpoint", id).entered();

        let now = time::now();
        let updated = self.commit(|data| {
            let endpoint = data.endpoints.get_mut(&id)?;
            patch.apply(endpoint);
            endpoint.updated_at = now;
            let updated = endpoint.clone();
            data.touch_collection(updated.collection_id, now);
            Some(updated)
        })?;
        if updated.is_none() {
            tracing::debug!("endpoint not found");
        }
        Ok(updated)
    }

    fn delete_endpoint(&mut self, id: i64) -> Result<bool> {
        let _span = tracing::debug_span!("json_delete_endpoint", id).entered();

        let removed = self.commit(|data| {
            let removed = data.endpoints.remove(&id)?;
            data.touch_collection(removed.collection_id, time::now());
            Some(())
        })?;
        if removed.is_none() {
            tracing::debug!("endpoint not found");
        }
        Ok(removed.is_some())
    }

    fn list_endpoints(
        &self,
        collection_id: i64,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<EndpointRecord>, u64)> {
        let _span =
            tracing::debug_span!("json_list_endpoints", collection_id, limit, offset).entered();

        let in_collection = || {
            self.data
                .endpoints
                .values()
                .filter(move |e| e.collection_id == collection_id)
        };
        let total = in_collection().count() as u64;
        let items = page_of(in_collection(), limit, offset);

        tracing::debug!(count = items.len(), total, "listed endpoints");
        Ok((items, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HttpMethod;
    use tempfile::TempDir;

    fn storage_in(dir: &TempDir) -> JsonStorage {
        JsonStorage::new(dir.path().join("store.json")).unwrap()
    }

    #[test]
    fn empty_store_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);

        let (items, total) = storage.list_collections(5, 0).unwrap();
        assert!(items.is_empty());
        assert_eq!(total, 0);
        assert!(storage.is_empty().unwrap());
    }

    #[test]
    fn offset_past_total_returns_empty_page_with_total() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);
        for name in ["a", "b", "c"] {
            storage.create_collection(name).unwrap();
        }

        let (items, total) = storage.list_collections(5, 10).unwrap();
        assert!(items.is_empty());
        assert_eq!(total, 3);
    }

    #[test]
    fn data_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let id = {
            let mut storage = storage_in(&dir);
            let collection = storage.create_collection("Persisted").unwrap();
            storage
                .create_endpoint(NewEndpoint {
                    method: HttpMethod::Post,
                    url: "https://example.com".to_string(),
                    ..NewEndpoint::named(collection.id, "Create")
                })
                .unwrap();
            collection.id
        };

        let storage = storage_in(&dir);
        let collection = storage.get_collection(id).unwrap().unwrap();
        assert_eq!(collection.name, "Persisted");
        let (endpoints, total) = storage.list_endpoints(id, 10, 0).unwrap();
        assert_eq!(total, 1);
        assert_eq!(endpoints[0].method, HttpMethod::Post);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);
        let first = storage.create_collection("one").unwrap();
        assert!(storage.delete_collection(first.id).unwrap());
        let second = storage.create_collection("two").unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn deleting_a_collection_removes_its_endpoints() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);
        let keep = storage.create_collection("keep").unwrap();
        let drop = storage.create_collection("drop").unwrap();
        storage.create_endpoint(NewEndpoint::named(keep.id, "k")).unwrap();
        storage.create_endpoint(NewEndpoint::named(drop.id, "d")).unwrap();

        assert!(storage.delete_collection(drop.id).unwrap());
        assert!(!storage.delete_collection(drop.id).unwrap());
        assert_eq!(storage.list_endpoints(drop.id, 10, 0).unwrap().1, 0);
        assert_eq!(storage.list_endpoints(keep.id, 10, 0).unwrap().1, 1);
    }

    #[test]
    fn endpoint_requires_existing_collection() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);
        assert!(storage
            .create_endpoint(NewEndpoint::named(99, "orphan"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);
        let collection = storage.create_collection("c").unwrap();
        let endpoint = storage
            .create_endpoint(NewEndpoint {
                url: "https://example.com".to_string(),
                ..NewEndpoint::named(collection.id, "e")
            })
            .unwrap()
            .unwrap();

        let updated = storage
            .update_endpoint(
                endpoint.id,
                EndpointPatch {
                    method: Some(HttpMethod::Put),
                    ..EndpointPatch::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.method, HttpMethod::Put);
        assert_eq!(updated.url, "https://example.com");
        assert_eq!(updated.name, "e");
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonStorage::new(path).err().unwrap();
        assert!(matches!(err, ReqError::Storage(_)));
    }

    /// Makes the temp path a directory so every save fails.
    fn block_saves(storage: &JsonStorage) {
        std::fs::create_dir(storage.path().with_extension("tmp")).unwrap();
    }

    #[test]
    fn failed_save_leaves_a_deleted_collection_in_place() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);
        let collection = storage.create_collection("keep").unwrap();
        storage.create_endpoint(NewEndpoint::named(collection.id, "e")).unwrap();
        block_saves(&storage);

        assert!(matches!(storage.delete_collection(collection.id), Err(ReqError::Io(_))));
        assert!(storage.get_collection(collection.id).unwrap().is_some());
        assert_eq!(storage.list_endpoints(collection.id, 10, 0).unwrap().1, 1);

        drop(storage);
        let reopened = storage_in(&dir);
        assert!(reopened.get_collection(collection.id).unwrap().is_some());
    }

    #[test]
    fn failed_save_rolls_back_every_mutation() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);
        let collection = storage.create_collection("before").unwrap();
        let endpoint = storage
            .create_endpoint(NewEndpoint::named(collection.id, "e"))
            .unwrap()
            .unwrap();
        block_saves(&storage);

        assert!(storage.create_collection("new").is_err());
        assert!(storage.rename_collection(collection.id, "after").is_err());
        assert!(storage.create_endpoint(NewEndpoint::named(collection.id, "f")).is_err());
        let patch = EndpointPatch {
            url: Some("https://changed.example".to_string()),
            ..EndpointPatch::default()
        };
        assert!(storage.update_endpoint(endpoint.id, patch).is_err());
        assert!(storage.delete_endpoint(endpoint.id).is_err());

        let (collections, total) = storage.list_collections(10, 0).unwrap();
        assert_eq!(total, 1);
        assert_eq!(collections[0], collection);
        assert_eq!(storage.get_endpoint(endpoint.id).unwrap(), Some(endpoint));
        assert_eq!(storage.list_endpoints(collection.id, 10, 0).unwrap().1, 1);

        // A failed insert does not consume an id.
        std::fs::remove_dir(storage.path().with_extension("tmp")).unwrap();
        let next = storage.create_collection("later").unwrap();
        assert_eq!(next.id, collection.id + 1);
    }

    #[test]
    fn missing_rows_do_not_write_the_file() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);
        assert!(!storage.delete_collection(7).unwrap());
        assert!(storage.rename_collection(7, "x").unwrap().is_none());
        assert!(!storage.path().exists());
    }
}
