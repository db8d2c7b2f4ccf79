//! Span exporter that appends OTLP/JSON batches to a rotating file.

use super::otlp;
use super::rotating::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::sync::Arc;

/// Writes each exported batch as one line of `file`.
#[derive(Debug)]
pub struct FileSpanExporter {
    file: Arc<RotatingFile>,
    resource: Resource,
    shut_down: bool,
}

impl FileSpanExporter {
    #[must_use]
    pub const fn new(file: Arc<RotatingFile>, resource: Resource) -> Self {
        Self {
            file,
            resource,
            shut_down: false,
        }
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.shut_down {
            Err(TraceError::from("span exporter already shut down"))
        } else {
            let line = otlp::encode_batch(&self.resource, &batch).to_string();
            self.file
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.shut_down = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Provider exporting every finished span synchronously to `file`.
#[must_use]
pub fn tracer_provider(file: Arc<RotatingFile>, resource: Resource) -> TracerProvider {
    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource.clone()))
        .with_simple_exporter(FileSpanExporter::new(file, resource))
        .build()
}
