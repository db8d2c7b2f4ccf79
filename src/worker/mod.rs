//! Background work off the UI thread.
//!
//! Storage calls and HTTP requests run on a [`WorkerPool`]. Views describe
//! the work as a [`WorkerMessage`] and get a [`WorkerResponse`] back through
//! the router.

pub mod messages;
pub mod pool;

pub use messages::{Job, Mutation, PageData, TraceContext, WorkerMessage, WorkerResponse};
pub use pool::WorkerPool;
