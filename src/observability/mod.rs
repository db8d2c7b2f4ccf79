//! Logging and tracing.
//!
//! ```text
//! tracing macros ─▶ EnvFilter ─┬─▶ fmt layer ─────────────────▶ reqtui.log
//!                              └─▶ tracing-opentelemetry ─▶ FileSpanExporter ─▶ reqtui-otlp.json
//! ```
//!
//! Both files live in the data directory and rotate at 10 MB, keeping three
//! backups. Worker jobs carry the posting span's context (see
//! [`TraceContext`](crate::worker::messages::TraceContext)) so a key press and
//! the storage or HTTP work it triggered share one trace.

mod exporter;
mod init;
mod otlp;
mod rotating;

pub use init::{init_tracing, LOG_FILE, TRACE_FILE};
pub use rotating::{RotatingFile, RotationPolicy};
