//! Storage layer for persistent collection and endpoint data.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation
//! - `models`: Storage record types separate from domain models
//! - `demo`: First-run demo data

pub mod backend;
pub mod demo;
pub mod json;
pub mod models;

pub use backend::Storage;
pub use demo::seed_demo_data;
pub use json::JsonStorage;
pub use models::{CollectionRecord, EndpointPatch, EndpointRecord, NewEndpoint};

use std::sync::{Arc, Mutex};

/// Storage shared between the worker threads.
pub type SharedStorage = Arc<Mutex<Box<dyn Storage>>>;

/// Wraps a backend for sharing between worker threads.
pub fn shared(storage: impl Storage + 'static) -> SharedStorage {
    Arc::new(Mutex::new(Box::new(storage)))
}
