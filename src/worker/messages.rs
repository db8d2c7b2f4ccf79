//! Worker message and response types.
//!
//! A [`WorkerMessage`] carries one unit of blocking work (a storage call or an
//! HTTP request) from the UI thread to the worker pool. The job produces a
//! [`WorkerResponse`], which the event loop routes back to the view named in
//! it.
//!
//! # Trace Context Propagation
//!
//! Messages capture the caller's OpenTelemetry span when they are built, so
//! worker-side spans join the same trace as the keypress that caused them.

use crate::app::context::{ResourceItem, ViewId};
use crate::domain::error::Result;
use crate::domain::Endpoint;
use crate::http::HttpResponse;
use serde::{Deserialize, Serialize};
use std::fmt;

/// W3C-style trace context handed across the thread boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID (32 hex characters).
    pub trace_id: String,

    /// Span ID of the span that built the message (16 hex characters).
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the current span's context, if it is part of a valid trace.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Boxed unit of work run on a worker thread.
pub type Job = Box<dyn FnOnce() -> WorkerResponse + Send + 'static>;

/// Work posted from a view to the worker pool.
pub struct WorkerMessage {
    /// Short operation name used for span and log fields.
    pub label: &'static str,

    pub trace_context: Option<TraceContext>,

    job: Job,
}

impl WorkerMessage {
    /// Wraps `job`, capturing the current trace context.
    pub fn new(label: &'static str, job: impl FnOnce() -> WorkerResponse + Send + 'static) -> Self {
        Self {
            label,
            trace_context: TraceContext::from_current(),
            job: Box::new(job),
        }
    }

    /// Runs the job on the calling thread.
    ///
    /// Attaches the captured trace context and wraps the job in a debug span.
    #[must_use]
    pub fn run(self) -> WorkerResponse {
        let _context_guard = attach_parent_trace_context(self.trace_context.as_ref());
        let span = tracing::debug_span!("worker_job", label = self.label);
        let _guard = span.entered();

        let response = (self.job)();
        tracing::debug!(view = %response.view(), outcome = response.outcome(), "job finished");
        response
    }
}

impl fmt::Debug for WorkerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerMessage")
            .field("label", &self.label)
            .field("trace_context", &self.trace_context)
            .finish_non_exhaustive()
    }
}

fn attach_parent_trace_context(trace_context: Option<&TraceContext>) -> Option<opentelemetry::ContextGuard> {
    use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

    let trace_context = trace_context?;
    let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
    let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

    let span_context = SpanContext::new(
        trace_id,
        span_id,
        TraceFlags::SAMPLED,
        true,
        TraceState::default(),
    );

    let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);
    Some(otel_context.attach())
}

/// One page of projected items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageData {
    /// Page the fetch was issued for (1-based).
    pub page: usize,
    pub items: Vec<ResourceItem>,
    pub total: u64,
}

/// Which mutation a [`WorkerResponse::Mutated`] reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    #[must_use]
    pub const fn past_tense(self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Update => "renamed",
            Self::Delete => "deleted",
        }
    }
}

/// Result of a worker job.
///
/// Every variant names the view that issued it. Responses carrying a
/// `generation` are discarded by the view if a newer request of the same kind
/// has been issued since.
#[derive(Debug)]
pub enum WorkerResponse {
    /// A list page fetch finished.
    PageLoaded {
        view: ViewId,
        generation: u64,
        result: Result<PageData>,
    },

    /// A create, update, or delete finished.
    Mutated {
        view: ViewId,
        op: Mutation,
        /// Title of the affected item, for the confirmation banner.
        title: String,
        /// Binding of the list view when the mutation was issued.
        binding: u64,
        result: Result<()>,
    },

    /// The detail view's endpoint was (re)loaded.
    EndpointLoaded {
        view: ViewId,
        generation: u64,
        result: Result<Endpoint>,
    },

    /// A field edit on the detail view was persisted.
    EndpointSaved {
        view: ViewId,
        generation: u64,
        result: Result<Endpoint>,
    },

    /// An HTTP request finished.
    ResponseReceived {
        view: ViewId,
        generation: u64,
        result: Result<HttpResponse>,
    },
}

impl WorkerResponse {
    /// View the response is addressed to.
    #[must_use]
    pub const fn view(&self) -> ViewId {
        match self {
            Self::PageLoaded { view, .. }
            | Self::Mutated { view, .. }
            | Self::EndpointLoaded { view, .. }
            | Self::EndpointSaved { view, .. }
            | Self::ResponseReceived { view, .. } => *view,
        }
    }

    /// `"ok"` or `"error"`, for log fields.
    #[must_use]
    pub fn outcome(&self) -> &'static str {
        let ok = match self {
            Self::PageLoaded { result, .. } => result.is_ok(),
            Self::Mutated { result, .. } => result.is_ok(),
            Self::EndpointLoaded { result, .. } | Self::EndpointSaved { result, .. } => result.is_ok(),
            Self::ResponseReceived { result, .. } => result.is_ok(),
        };
        if ok {
            "ok"
        } else {
            "error"
        }
    }
}
