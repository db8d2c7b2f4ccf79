//! Subscriber setup.

use super::exporter;
use super::rotating::{RotatingFile, RotationPolicy};
use crate::domain::error::Result;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::sync::Arc;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the data directory.
pub const LOG_FILE: &str = "reqtui.log";
/// Span export file name inside the data directory.
pub const TRACE_FILE: &str = "reqtui-otlp.json";

/// Installs the global subscriber: an `EnvFilter`, a plain-text `fmt` layer
/// writing to [`LOG_FILE`] and an OpenTelemetry layer exporting to
/// [`TRACE_FILE`], both under `config.data_dir`.
///
/// `RUST_LOG` takes precedence over `config.trace_level`. Calling this again
/// after a subscriber is installed has no effect.
///
/// # Errors
///
/// [`ReqError::Io`](crate::ReqError::Io) if the data directory cannot be
/// created.
pub fn init_tracing(config: &Config) -> Result<()> {
    std::fs::create_dir_all(&config.data_dir)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.trace_filter()));

    let log = Arc::new(RotatingFile::new(
        config.data_dir.join(LOG_FILE),
        RotationPolicy::default(),
    ));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(log)
        .with_ansi(false)
        .with_thread_names(true);

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "reqtui"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let spans = Arc::new(RotatingFile::new(
        config.data_dir.join(TRACE_FILE),
        RotationPolicy::default(),
    ));
    let provider = exporter::tracer_provider(spans, resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer("reqtui"));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();

    if installed.is_ok() {
        tracing::info!(data_dir = %config.data_dir.display(), "tracing initialized");
    }
    Ok(())
}
