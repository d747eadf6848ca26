//! Attach request context (instance path, trace id) to `Problem` responses.

use crate::problem::Problem;

fn current_trace_id() -> Option<String> {
    tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string())
}

pub trait WithRequestContext {
    /// Set `instance` to the request path and `trace_id` from the active span.
    #[must_use]
    fn with_request_context(self, uri: &axum::http::Uri) -> Self;
}

impl WithRequestContext for Problem {
    fn with_request_context(self, uri: &axum::http::Uri) -> Self {
        let problem = self.with_instance(uri.path());
        match current_trace_id() {
            Some(tid) => problem.with_trace_id(tid),
            None => problem,
        }
    }
}
