//! Request logging.
//!
//! One span per request carrying the method and path, and one event per
//! response whose level follows the status class: `INFO` for 2xx, `WARN` for
//! 3xx, `ERROR` for 4xx and 5xx.

use std::time::Duration;

use axum::body::HttpBody;
use axum::http::{Request, Response};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{
    DefaultOnBodyChunk, DefaultOnEos, DefaultOnRequest, MakeSpan, OnResponse, TraceLayer,
};
use tracing::Span;

/// Trace layer installed on the top-level router.
pub type RequestTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    RequestSpan,
    DefaultOnRequest,
    LogResponse,
    DefaultOnBodyChunk,
    DefaultOnEos,
    (),
>;

/// Build the request trace layer.
///
/// Failures are already reported by [`LogResponse`], so the failure hook is
/// disabled.
#[must_use]
pub fn layer() -> RequestTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_response(LogResponse)
        .on_failure(())
}

/// Opens an `INFO` span named `request` with `method` and `path` fields.
#[derive(Debug, Clone, Copy)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
        )
    }
}

/// Logs status, latency and body size once the response head is ready.
#[derive(Debug, Clone, Copy)]
pub struct LogResponse;

impl<B: HttpBody> OnResponse<B> for LogResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        let status = response.status().as_u16();
        let latency_ms = latency.as_secs_f64() * 1000.0;
        let size = response.body().size_hint().exact();

        if response.status().is_success() {
            tracing::info!(status, latency_ms, size, "response");
        } else if response.status().is_redirection() {
            tracing::warn!(status, latency_ms, size, "response");
        } else {
            tracing::error!(status, latency_ms, size, "response");
        }
    }
}
