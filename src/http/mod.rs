//! Outbound HTTP request execution.
//!
//! - [`models`]: request and response value types
//! - [`executor`]: the [`RequestExecutor`] seam and its reqwest implementation

pub mod executor;
pub mod models;

pub use executor::{RequestExecutor, ReqwestExecutor};
pub use models::{HttpRequest, HttpResponse};
