//! Domain layer for reqtui.
//!
//! Core types and rules for collections and endpoints, independent of the
//! terminal runtime, the storage backend and the HTTP client.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`collection`]: Collection domain model
//! - [`endpoint`]: Endpoint domain model and HTTP methods
//! - [`validation`]: Name, id, URL and header validation
//! - [`time`]: Relative timestamp formatting

pub mod collection;
pub mod endpoint;
pub mod error;
pub mod time;
pub mod validation;

pub use collection::Collection;
pub use endpoint::{Endpoint, HttpMethod};
pub use error::{ReqError, Result};
